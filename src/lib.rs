//! tftldr - Terraform plan summaries
//!
//! Extracts the resources a Terraform plan will create, update or delete,
//! with the parameters each update touches, and renders them as a table or CSV.

pub mod config;
pub mod diff;
pub mod extract;
pub mod filter;
pub mod report;
pub mod resolver;
pub mod terraform;

mod error;

pub use config::{ColumnConfig, Config, FilterConfig};
pub use error::TftldrError;
pub use extract::{ChangeRecord, Extractor, extract};
pub use resolver::{ResourceConvention, Resolver};
pub use terraform::{Action, PlanError, ResourceChange, TerraformPlan, parse_plan};

/// Decodes a plan document and extracts its change records in one step.
pub fn summarize(
    plan_json: &str,
    filter: &FilterConfig,
) -> Result<Vec<ChangeRecord>, TftldrError> {
    let plan = parse_plan(plan_json)?;
    Ok(extract(&plan.resource_changes, filter))
}
