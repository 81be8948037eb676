//! Turns planned resource changes into report rows.

use serde::Serialize;

use crate::config::FilterConfig;
use crate::diff::{changed_attributes, join_attributes};
use crate::filter::should_ignore;
use crate::resolver::Resolver;
use crate::terraform::{Action, ResourceChange};

/// Shown instead of a diff for actions that replace the whole object.
pub const ALL_PARAMETERS: &str = "All parameters";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub change_type: String,
    pub resource_name: String,
    pub changed_params: String,
    pub resource_type: String,
    pub resource_address: String,
}

#[derive(Debug, Default)]
pub struct Extractor {
    resolver: Resolver,
}

impl Extractor {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// One record per actionable action of every resource change that passes
    /// the filter, stable-sorted by change type.
    pub fn extract(
        &self,
        resource_changes: &[ResourceChange],
        filter: &FilterConfig,
    ) -> Vec<ChangeRecord> {
        let mut records: Vec<ChangeRecord> = resource_changes
            .iter()
            .filter(|rc| {
                let ignored = should_ignore(&rc.resource_type, filter);
                if ignored {
                    tracing::debug!(
                        address = %rc.address,
                        resource_type = %rc.resource_type,
                        "ignoring resource change"
                    );
                }
                !ignored
            })
            .flat_map(|rc| {
                rc.change
                    .actions
                    .iter()
                    .filter_map(move |action| self.record(rc, action))
            })
            .collect();

        // Vec::sort_by is stable, so records of one type keep plan order.
        records.sort_by(|a, b| a.change_type.cmp(&b.change_type));

        tracing::debug!(count = records.len(), "extracted change records");
        records
    }

    fn record(&self, rc: &ResourceChange, action: &Action) -> Option<ChangeRecord> {
        let change = &rc.change;

        let (attrs, changed_params) = match action {
            Action::NoOp | Action::Read => return None,
            Action::Create => (&change.after, ALL_PARAMETERS.to_string()),
            Action::Delete => (&change.before, ALL_PARAMETERS.to_string()),
            Action::Update => (
                &change.after,
                join_attributes(&changed_attributes(&change.before, &change.after)),
            ),
            Action::Other(token) => {
                tracing::warn!(
                    address = %rc.address,
                    action = %token,
                    "unrecognized action, passing it through"
                );
                let attrs = if change.after.is_empty() {
                    &change.before
                } else {
                    &change.after
                };
                (attrs, ALL_PARAMETERS.to_string())
            }
        };

        Some(ChangeRecord {
            change_type: action.as_str().to_string(),
            resource_name: self.resolver.resolve_name(&rc.resource_type, attrs),
            changed_params,
            resource_type: self.resolver.resolve_type(&rc.resource_type, attrs),
            resource_address: rc.address.clone(),
        })
    }
}

/// [`Extractor::extract`] with the default resolver.
pub fn extract(resource_changes: &[ResourceChange], filter: &FilterConfig) -> Vec<ChangeRecord> {
    Extractor::default().extract(resource_changes, filter)
}
