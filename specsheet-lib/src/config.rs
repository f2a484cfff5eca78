//! Editor configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drag::ACTIVATION_DISTANCE;
use crate::edit::DraftPolicy;
use crate::error::ConfigError;
use crate::model::{DEFAULT_COLUMN_WIDTH, MIN_COLUMN_WIDTH};

/// Tunables for a [`TableEditor`](crate::TableEditor).
///
/// Every field is optional in the JSON form; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Pointer travel in px before a press on a handle starts a drag.
    pub activation_distance: f32,
    /// Width of newly added columns.
    pub default_column_width: u32,
    /// Smallest width a column may be resized to.
    pub min_column_width: u32,
    /// How open drafts react to external value changes.
    pub draft_policy: DraftPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            activation_distance: ACTIVATION_DISTANCE,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: MIN_COLUMN_WIDTH,
            draft_policy: DraftPolicy::default(),
        }
    }
}

impl TableConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = TableConfig::from_json(r#"{"draft_policy": "last_writer_wins"}"#).unwrap();
        assert_eq!(config.draft_policy, DraftPolicy::LastWriterWins);
        assert_eq!(config.activation_distance, 5.0);
        assert_eq!(config.default_column_width, 150);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            TableConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
