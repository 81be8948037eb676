//! Terraform plan decoding.
//!
//! Reads the JSON emitted by `terraform show -json <planfile>` and keeps only
//! what the change summary needs: one [`ResourceChange`] per planned resource.

mod plan;

pub use plan::{Action, Attributes, Change, ResourceChange, TerraformPlan};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("malformed plan at {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub fn parse_plan(input: &str) -> Result<TerraformPlan, PlanError> {
    let document: Value = serde_json::from_str(input)?;
    plan_from_value(document)
}

/// Decodes an already parsed plan document.
///
/// Fails when `resource_changes` is missing or not a sequence, or when an
/// entry is not an object with a string `type`. Every other field is optional.
pub fn plan_from_value(document: Value) -> Result<TerraformPlan, PlanError> {
    let Value::Object(mut root) = document else {
        return Err(PlanError::malformed(
            "$",
            format!("expected an object, found {}", kind_of(&document)),
        ));
    };

    let entries = match root.remove("resource_changes") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(PlanError::malformed(
                "resource_changes",
                format!("expected a sequence, found {}", kind_of(&other)),
            ));
        }
        None => return Err(PlanError::malformed("resource_changes", "missing field")),
    };

    let resource_changes = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_resource_change(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = resource_changes.len(), "decoded resource changes");

    Ok(TerraformPlan { resource_changes })
}

fn decode_resource_change(index: usize, entry: Value) -> Result<ResourceChange, PlanError> {
    let path = format!("resource_changes[{}]", index);

    let Value::Object(fields) = &entry else {
        return Err(PlanError::malformed(
            path,
            format!("expected an object, found {}", kind_of(&entry)),
        ));
    };

    match fields.get("type") {
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(PlanError::malformed(
                format!("{}.type", path),
                format!("expected a string, found {}", kind_of(other)),
            ));
        }
        None => return Err(PlanError::malformed(format!("{}.type", path), "missing field")),
    }

    serde_json::from_value(entry).map_err(|e| PlanError::malformed(path, e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}
