//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treestore/treestore.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TREESTORE_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::codec::{DEFAULT_ID_FIELD, DEFAULT_PARENT_FIELD, DEFAULT_ROOT_SENTINEL};
use crate::domain::RecordSchema;

/// How query results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One record per line, tree as ASCII art
    #[default]
    Text,
    /// JSON arrays of record objects
    Json,
}

/// Unified configuration for treestore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Parent value marking a top-level record (default: "root")
    pub root_sentinel: String,
    /// Name of the id field in input records
    pub id_field: String,
    /// Name of the parent field in input records
    pub parent_field: String,
    /// Output format for query results
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Record file used when a command gets no FILE argument
    pub default_input: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_sentinel: DEFAULT_ROOT_SENTINEL.into(),
            id_field: DEFAULT_ID_FIELD.into(),
            parent_field: DEFAULT_PARENT_FIELD.into(),
            format: OutputFormat::default(),
            pretty: true,
            default_input: None,
        }
    }
}

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub root_sentinel: Option<String>,
    pub id_field: Option<String>,
    pub parent_field: Option<String>,
    pub format: Option<OutputFormat>,
    pub pretty: Option<bool>,
    pub default_input: Option<PathBuf>,
}

/// Get the XDG config directory for treestore.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treestore").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treestore.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Field names and sentinel for decoding records.
    pub fn schema(&self) -> RecordSchema {
        RecordSchema {
            id_field: self.id_field.clone(),
            parent_field: self.parent_field.clone(),
            root_sentinel: self.root_sentinel.clone(),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Overlay wins for every field it specifies.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            root_sentinel: overlay
                .root_sentinel
                .clone()
                .unwrap_or_else(|| self.root_sentinel.clone()),
            id_field: overlay
                .id_field
                .clone()
                .unwrap_or_else(|| self.id_field.clone()),
            parent_field: overlay
                .parent_field
                .clone()
                .unwrap_or_else(|| self.parent_field.clone()),
            format: overlay.format.unwrap_or(self.format),
            pretty: overlay.pretty.unwrap_or(self.pretty),
            default_input: overlay
                .default_input
                .clone()
                .or_else(|| self.default_input.clone()),
        }
    }

    /// Apply TREESTORE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // TREESTORE_ROOT_SENTINEL -> root_sentinel; "__" is reserved for nesting
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREESTORE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("root_sentinel") {
            settings.root_sentinel = val;
        }
        if let Ok(val) = config.get_string("id_field") {
            settings.id_field = val;
        }
        if let Ok(val) = config.get_string("parent_field") {
            settings.parent_field = val;
        }
        if let Ok(val) = config.get_string("format") {
            settings.format = OutputFormat::from_str(&val, true).map_err(|_| ApplicationError::Config {
                message: format!("invalid TREESTORE_FORMAT: {}", val),
            })?;
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
        }
        if let Ok(val) = config.get_string("default_input") {
            settings.default_input = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        if let Some(path) = &self.default_input {
            self.default_input = Some(PathBuf::from(expand_env_vars(&path.to_string_lossy())));
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.id_field.is_empty() || self.parent_field.is_empty() {
            return Err(ApplicationError::Config {
                message: "id_field and parent_field must not be empty".into(),
            });
        }
        if self.id_field == self.parent_field {
            return Err(ApplicationError::Config {
                message: format!("id_field and parent_field are both '{}'", self.id_field),
            });
        }
        Ok(())
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_building_schema_then_uses_root_sentinel() {
        let schema = Settings::default().schema();
        assert_eq!(schema, RecordSchema::default());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let overlay = RawSettings {
            root_sentinel: Some("ROOT".into()),
            pretty: Some(false),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.root_sentinel, "ROOT");
        assert!(!merged.pretty);
        assert_eq!(merged.id_field, "id");
        assert_eq!(merged.format, OutputFormat::Text);
    }

    #[test]
    fn given_same_field_names_when_validating_then_errors() {
        let settings = Settings {
            parent_field: "id".into(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
