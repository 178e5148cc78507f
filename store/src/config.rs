//! Generator configuration.
//!
//! Every section is optional; a missing file section falls back to the
//! built-in behavior.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! snapshot:
//!   version: "2.0.0"
//!   name: rest-api
//! overrides:
//!   may_be_null:
//!     TypeStyle: [fontPostScriptName]
//!     CANVAS: [prototypeStartNodeID]
//!   optional:
//!     Paint: [visible, opacity]
//! schema:
//!   root_properties:
//!     document: DOCUMENT
//! typescript:
//!   export: false
//! ```

use std::collections::BTreeMap;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use apidoc_codegen::TsOptions;
use apidoc_normalize::OverrideTables;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata stamped on snapshots produced by `normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot version string.
    #[serde(default = "default_snapshot_version")]
    pub version: String,
    /// Optional snapshot name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            version: default_snapshot_version(),
            name: None,
        }
    }
}

/// Schema document settings.
///
/// # Examples
///
/// ```
/// # use apidoc_store::SchemaConfig;
/// let config: SchemaConfig = serde_yaml::from_str("root_properties: { document: DOCUMENT }").unwrap();
/// assert_eq!(config.root_properties["document"], "DOCUMENT");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Top-level property name to the definition it must match.
    #[serde(default)]
    pub root_properties: BTreeMap<String, String>,
}

/// Top-level generator configuration.
///
/// # Examples
///
/// ```no_run
/// use apidoc_store::GenConfig;
///
/// let config = GenConfig::load("apidoc.yml").unwrap();
/// println!("export declarations: {}", config.typescript.export);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Configuration format version (e.g., `"1.0"`).
    #[serde(default = "default_config_version")]
    pub version: String,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Nullable / optional corrections.
    #[serde(default)]
    pub overrides: OverrideTables,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub typescript: TsOptions,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            snapshot: SnapshotConfig::default(),
            overrides: OverrideTables::default(),
            schema: SchemaConfig::default(),
            typescript: TsOptions::default(),
        }
    }
}

fn default_config_version() -> String {
    "1.0".to_string()
}

fn default_snapshot_version() -> String {
    "1.0.0".to_string()
}

impl GenConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::StoreError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Loads `path` when given, else returns the defaults.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::StoreError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
snapshot:
  version: "2.0.0"
  name: rest-api
overrides:
  may_be_null:
    TypeStyle: [fontPostScriptName]
  optional:
    Paint: [visible, opacity]
schema:
  root_properties:
    document: DOCUMENT
typescript:
  export: true
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: GenConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.snapshot.version, "2.0.0");
        assert_eq!(config.snapshot.name.as_deref(), Some("rest-api"));
        assert_eq!(config.overrides.may_be_null.len(), 1);
        assert!(!config.overrides.may_be_null.contains_key("CANVAS"));
        assert_eq!(config.overrides.optional["Paint"], vec!["visible", "opacity"]);
        assert_eq!(config.schema.root_properties["document"], "DOCUMENT");
        assert!(config.typescript.export);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: GenConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, GenConfig::default());
        assert_eq!(config.overrides, OverrideTables::default());
        assert!(config.schema.root_properties.is_empty());
        assert!(!config.typescript.export);
        assert_eq!(config.snapshot.version, "1.0.0");
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = GenConfig::load_or_default(None::<&Path>).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apidoc.yml");

        let original: GenConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = GenConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GenConfig::load(dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, crate::StoreError::IoError(_)));
    }
}
