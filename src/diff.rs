use std::collections::BTreeSet;

use serde_json::{Number, Value};

use crate::terraform::Attributes;

/// Names of the top-level attributes that were added, removed or changed
/// between `before` and `after`.
///
/// Nested values are compared as whole blobs with [`values_equal`]; the
/// result is ordered by name.
pub fn changed_attributes(before: &Attributes, after: &Attributes) -> BTreeSet<String> {
    let changed_or_added = after.iter().filter_map(|(key, new)| match before.get(key) {
        Some(old) if values_equal(old, new) => None,
        _ => Some(key.clone()),
    });

    let removed = before
        .keys()
        .filter(|key| !after.contains_key(*key))
        .cloned();

    changed_or_added.chain(removed).collect()
}

/// Structural equality that treats `1` and `1.0` as the same number.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (integral(a), integral(b)) {
        (Some(x), Some(y)) => x == y,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

// Exact integer value of a number, including floats with no fractional part.
fn integral(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(i128::from(u));
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f.abs() < 1e38).then_some(f as i128)
}

/// Joins attribute names for display, e.g. `"size, tag"`.
pub fn join_attributes(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
