//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the built-in category table, column patterns, origin markers and
//! header inference rules.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ekokom_ingest::InferenceRules;
use ekokom_model::{CategoryTable, OriginPolicy};

use crate::aggregate::UnclassifiedPolicy;
use crate::error::{CoreError, Result};
use crate::roles::ColumnRoles;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub categories: CategoryTable,
    pub columns: ColumnRoles,
    pub origin: OriginPolicy,
    pub unclassified: UnclassifiedPolicy,
    pub schema: InferenceRules,
}

impl EngineConfig {
    /// Loads a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&contents).map_err(|message| CoreError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(
            path = %path.display(),
            categories = config.categories.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    pub fn from_json(contents: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(contents).map_err(|error| error.to_string())
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let config = EngineConfig::from_json(
            r#"{
                "categories": [
                    {"name": "Hracky", "match_pattern": "hrack", "coefficient_plastic": 0.00002,
                     "cardboard_units_per_box": 10}
                ],
                "unclassified": "bucket"
            }"#,
        )
        .unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.unclassified, UnclassifiedPolicy::Bucket);
        assert_eq!(config.columns, ColumnRoles::default());
        assert_eq!(config.origin, OriginPolicy::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = EngineConfig::from_json(r#"{"categorie": []}"#).unwrap_err();
        assert!(err.contains("categorie"));
    }

    #[test]
    fn load_reports_path_on_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = EngineConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn default_config_round_trips() {
        let json = EngineConfig::default().to_json_pretty().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), EngineConfig::default());
    }
}
