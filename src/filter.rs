use crate::config::FilterConfig;

/// Returns true when `resource_type` is excluded from the report, either by
/// exact name or by one of the configured prefixes.
pub fn should_ignore(resource_type: &str, config: &FilterConfig) -> bool {
    config.types.iter().any(|t| t == resource_type)
        || config
            .prefixes
            .iter()
            .any(|prefix| resource_type.starts_with(prefix.as_str()))
}
