//! Conventions for the AzAPI provider.
//!
//! AzAPI resources wrap an arbitrary Azure Resource Manager type and carry it
//! in their own `type` attribute as `"<ResourceType>@<apiVersion>"`, e.g.
//! `"Microsoft.Storage/storageAccounts@2023-01-01"`.

use super::{ResourceConvention, Resolver, attribute_text};
use crate::terraform::Attributes;

/// Types whose display type is the embedded ARM type.
pub const WRAPPER_TYPES: &[&str] = &[
    "azapi_resource",
    "azapi_update_resource",
    "azapi_data_plane_resource",
];

/// Types that invoke an ARM action rather than managing a resource.
pub const ACTION_TYPES: &[&str] = &["azapi_resource_action"];

pub fn register(resolver: &mut Resolver) {
    for resource_type in WRAPPER_TYPES {
        resolver.register(*resource_type, EmbeddedType);
    }
    for resource_type in ACTION_TYPES {
        resolver.register(*resource_type, ResourceAction);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmbeddedType;

impl ResourceConvention for EmbeddedType {
    fn display_type(&self, attrs: &Attributes) -> Option<String> {
        embedded_type(attrs)
    }
}

/// Names the resource after the action it performs, e.g. `listKeys` becomes
/// `"Action: ListKeys"`.
#[derive(Debug, Clone, Copy)]
pub struct ResourceAction;

impl ResourceConvention for ResourceAction {
    fn name(&self, attrs: &Attributes) -> Option<String> {
        let action = attribute_text(attrs, "action")?;
        Some(format!("Action: {}", capitalize(&action)))
    }

    fn display_type(&self, attrs: &Attributes) -> Option<String> {
        embedded_type(attrs)
    }
}

fn embedded_type(attrs: &Attributes) -> Option<String> {
    let raw = attribute_text(attrs, "type")?;
    let base = raw.split_once('@').map_or(raw.as_str(), |(base, _)| base);
    (!base.is_empty()).then(|| base.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
