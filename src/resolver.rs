//! Display name and type resolution.
//!
//! Every resource goes through the same fallback chain unless a
//! [`ResourceConvention`] is registered for its provider type. Conventions
//! are looked up by exact type name and may answer only one of the two
//! questions; whatever they leave as `None` falls through to the generic path.

pub mod azapi;

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::terraform::Attributes;

pub const UNKNOWN_NAME: &str = "Unknown";

/// Attributes tried in order when no convention names the resource.
const NAME_ATTRIBUTES: &[&str] = &["display_name", "name", "resource_id", "id"];

pub trait ResourceConvention: Send + Sync {
    fn name(&self, _attrs: &Attributes) -> Option<String> {
        None
    }

    fn display_type(&self, _attrs: &Attributes) -> Option<String> {
        None
    }
}

pub struct Resolver {
    conventions: HashMap<String, Box<dyn ResourceConvention>>,
}

impl Resolver {
    /// A resolver with no provider conventions, only the generic fallbacks.
    pub fn empty() -> Self {
        Self {
            conventions: HashMap::new(),
        }
    }

    /// Registers `convention` for `resource_type`, replacing any previous one.
    pub fn register<C>(&mut self, resource_type: impl Into<String>, convention: C)
    where
        C: ResourceConvention + 'static,
    {
        self.conventions
            .insert(resource_type.into(), Box::new(convention));
    }

    pub fn has_convention(&self, resource_type: &str) -> bool {
        self.conventions.contains_key(resource_type)
    }

    pub fn resolve_name(&self, resource_type: &str, attrs: &Attributes) -> String {
        if let Some(name) = self
            .conventions
            .get(resource_type)
            .and_then(|c| c.name(attrs))
        {
            return name;
        }

        NAME_ATTRIBUTES
            .iter()
            .find_map(|key| attribute_text(attrs, key))
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }

    pub fn resolve_type(&self, resource_type: &str, attrs: &Attributes) -> String {
        self.conventions
            .get(resource_type)
            .and_then(|c| c.display_type(attrs))
            .unwrap_or_else(|| resource_type.to_string())
    }
}

impl Default for Resolver {
    fn default() -> Self {
        let mut resolver = Self::empty();
        azapi::register(&mut resolver);
        resolver
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.conventions.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("Resolver")
            .field("conventions", &types)
            .finish()
    }
}

/// Renders an attribute for display. Null, missing and empty-string values
/// count as absent.
pub fn attribute_text(attrs: &Attributes, key: &str) -> Option<String> {
    match attrs.get(key)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
