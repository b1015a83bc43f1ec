//! Ledger configuration via `landledger.toml`
//!
//! The three checks below close gaps the ledger historically left open. All
//! default to on; [`LedgerConfig::permissive`] turns them off for hosts that
//! need the old, unchecked behaviour.

use std::path::Path;

use serde::{Deserialize, Serialize};

use landledger_core::{LedgerError, Result};

/// Config file name looked up by hosts
pub const CONFIG_FILE_NAME: &str = "landledger.toml";

/// Ledger behaviour switches loaded from `landledger.toml`.
///
/// # Example
///
/// ```toml
/// enforce_status_transitions = true
/// unique_milestone_labels = true
/// require_existing_parcel = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Reject status changes outside the lifecycle graph
    #[serde(default = "default_true")]
    pub enforce_status_transitions: bool,
    /// Reject a milestone whose label the project already uses
    #[serde(default = "default_true")]
    pub unique_milestone_labels: bool,
    /// Reject projects anchored to an unregistered parcel
    #[serde(default = "default_true")]
    pub require_existing_parcel: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enforce_status_transitions: true,
            unique_milestone_labels: true,
            require_existing_parcel: true,
        }
    }
}

impl LedgerConfig {
    /// Every check off
    pub fn permissive() -> Self {
        Self {
            enforce_status_transitions: false,
            unique_milestone_labels: false,
            require_existing_parcel: false,
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Land ledger configuration
#
# Reject project status changes outside
#   created -> active -> funded -> completed, and any open status -> cancelled
enforce_status_transitions = true

# Reject AddMilestone when the project already has a milestone with that label
unique_milestone_labels = true

# Reject CreateProject when the referenced parcel is not registered
require_existing_parcel = true
"#
    }

    /// Parse config text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text)
            .map_err(|e| LedgerError::invalid_argument(format!("Failed to parse config: {}", e)))
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// `StoreIO` if the file cannot be read, `InvalidArgument` if it cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::store_io(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            LedgerError::invalid_argument(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                LedgerError::store_io(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LedgerError::invalid_argument(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            LedgerError::store_io(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
