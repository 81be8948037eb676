//! Ignore-list and column configuration.
//!
//! Built once at startup from the defaults merged with an optional YAML file,
//! then passed by reference into extraction and rendering.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::TftldrError;

pub const DEFAULT_CONFIG_FILE: &str = ".tftldr.yml";

const DEFAULT_IGNORED_PREFIXES: &[&str] = &["random_", "time_"];
const DEFAULT_IGNORED_TYPES: &[&str] = &["terraform_data", "null_resource"];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub ignore: FilterConfig,
    pub columns: ColumnConfig,
}

/// Resource types left out of the report entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub types: Vec<String>,
    pub prefixes: Vec<String>,
}

impl FilterConfig {
    pub fn empty() -> Self {
        Self {
            types: Vec::new(),
            prefixes: Vec::new(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            types: DEFAULT_IGNORED_TYPES.iter().map(|s| s.to_string()).collect(),
            prefixes: DEFAULT_IGNORED_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Which report columns are shown. All visible by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnConfig {
    pub change_type: bool,
    pub resource_name: bool,
    pub changed_params: bool,
    pub resource_type: bool,
    pub resource_address: bool,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            change_type: true,
            resource_name: true,
            changed_params: true,
            resource_type: true,
            resource_address: true,
        }
    }
}

// On-disk shape. Every key is optional so that a file only overrides what it
// mentions.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    ignore: IgnoreSection,
    columns: ColumnSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IgnoreSection {
    types: Option<Vec<String>>,
    prefixes: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ColumnSection {
    change_type: Option<bool>,
    resource_name: Option<bool>,
    changed_params: Option<bool>,
    resource_type: Option<bool>,
    resource_address: Option<bool>,
}

impl Config {
    /// Parses a YAML document and merges it over the defaults.
    pub fn from_yaml(input: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let file: ConfigFile = serde_yaml::from_str(input)?;
        Ok(Self::default().merge(file))
    }

    pub fn from_path(path: &Path) -> Result<Self, TftldrError> {
        let content = std::fs::read_to_string(path).map_err(|e| TftldrError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content).map_err(|e| TftldrError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolves the configuration for a run.
    ///
    /// An explicit path must load. Otherwise `.tftldr.yml` in the working
    /// directory, then `<config dir>/tftldr/config.yml`, are tried; a
    /// discovered file that fails to load is reported and skipped.
    pub fn load(explicit: Option<&Path>) -> Result<Self, TftldrError> {
        if let Some(path) = explicit {
            let config = Self::from_path(path)?;
            tracing::debug!(path = %path.display(), "loaded configuration");
            return Ok(config);
        }

        for candidate in discovery_candidates() {
            if !candidate.is_file() {
                continue;
            }
            match Self::from_path(&candidate) {
                Ok(config) => {
                    tracing::debug!(path = %candidate.display(), "loaded configuration");
                    return Ok(config);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable configuration file");
                    return Ok(Self::default());
                }
            }
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(types) = file.ignore.types {
            self.ignore.types = types;
        }
        if let Some(prefixes) = file.ignore.prefixes {
            self.ignore.prefixes = prefixes;
        }

        let columns = &mut self.columns;
        let section = file.columns;
        columns.change_type = section.change_type.unwrap_or(columns.change_type);
        columns.resource_name = section.resource_name.unwrap_or(columns.resource_name);
        columns.changed_params = section.changed_params.unwrap_or(columns.changed_params);
        columns.resource_type = section.resource_type.unwrap_or(columns.resource_type);
        columns.resource_address = section
            .resource_address
            .unwrap_or(columns.resource_address);

        self
    }
}

fn discovery_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("tftldr").join("config.yml"));
    }
    candidates
}
