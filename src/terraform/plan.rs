use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Flat attribute map of a resource state, as found under `change.before`
/// and `change.after`.
pub type Attributes = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TerraformPlan {
    pub resource_changes: Vec<ResourceChange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceChange {
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub change: Change,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Change {
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<Action>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub before: Attributes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub after: Attributes,
}

/// A single proposed operation on a resource.
///
/// Tokens Terraform may add in later versions decode into [`Action::Other`]
/// instead of failing the whole plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Action {
    Create,
    Update,
    Delete,
    NoOp,
    Read,
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::NoOp => "no-op",
            Action::Read => "read",
            Action::Other(token) => token.as_str(),
        }
    }

    /// `no-op` and `read` never show up in a change summary.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Action::NoOp | Action::Read)
    }
}

impl From<String> for Action {
    fn from(token: String) -> Self {
        match token.as_str() {
            "create" => Action::Create,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "no-op" => Action::NoOp,
            "read" => Action::Read,
            _ => Action::Other(token),
        }
    }
}

impl From<&str> for Action {
    fn from(token: &str) -> Self {
        Action::from(token.to_string())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_known_tokens() {
        let actions: Vec<Action> =
            serde_json::from_value(json!(["create", "update", "delete", "no-op", "read"]))
                .unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Create,
                Action::Update,
                Action::Delete,
                Action::NoOp,
                Action::Read
            ]
        );
    }

    #[test]
    fn test_action_unknown_token_passes_through() {
        let action: Action = serde_json::from_value(json!("forget")).unwrap();
        assert_eq!(action, Action::Other("forget".to_string()));
        assert_eq!(action.as_str(), "forget");
        assert!(action.is_actionable());
    }

    #[test]
    fn test_action_display_matches_wire_token() {
        assert_eq!(Action::NoOp.to_string(), "no-op");
        assert_eq!(Action::Delete.to_string(), "delete");
    }

    #[test]
    fn test_action_is_actionable() {
        assert!(Action::Create.is_actionable());
        assert!(Action::Update.is_actionable());
        assert!(Action::Delete.is_actionable());
        assert!(!Action::NoOp.is_actionable());
        assert!(!Action::Read.is_actionable());
    }

    #[test]
    fn test_resource_change_ignores_unknown_fields() {
        let rc: ResourceChange = serde_json::from_value(json!({
            "address": "module.net.azurerm_subnet.app[0]",
            "module_address": "module.net",
            "mode": "managed",
            "type": "azurerm_subnet",
            "name": "app",
            "index": 0,
            "provider_name": "registry.terraform.io/hashicorp/azurerm",
            "change": {
                "actions": ["delete", "create"],
                "before": {"name": "snet-app", "address_prefixes": ["10.0.1.0/24"]},
                "after": {"name": "snet-app", "address_prefixes": ["10.0.2.0/24"]},
                "replace_paths": [["address_prefixes"]]
            },
            "action_reason": "replace_because_cannot_update"
        }))
        .unwrap();

        assert_eq!(rc.address, "module.net.azurerm_subnet.app[0]");
        assert_eq!(rc.change.actions, vec![Action::Delete, Action::Create]);
        assert_eq!(rc.change.before["address_prefixes"], json!(["10.0.1.0/24"]));
    }

    #[test]
    fn test_change_null_fields_default_to_empty() {
        let change: Change = serde_json::from_value(json!({
            "actions": null,
            "before": null,
            "after": null
        }))
        .unwrap();
        assert_eq!(change, Change::default());
    }
}
