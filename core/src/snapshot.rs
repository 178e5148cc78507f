use serde::{Deserialize, Serialize};

use crate::ObjectType;

/// Serializable model bundle produced by one extraction run.
///
/// A snapshot wraps the canonical type list with version metadata so it can
/// be persisted, diffed against a later run, and fed to the generators.
///
/// # Examples
///
/// ```
/// use apidoc_core::*;
///
/// let mut snapshot = ModelSnapshot::new("1.0.0", "2026-10-17T10:30:00Z");
/// snapshot.name = Some("rest-api".into());
/// snapshot.types.push(ObjectType::object("Color"));
/// snapshot.types.push(ObjectType::enumeration("StyleType", ["FILL", "TEXT"]));
///
/// assert_eq!(snapshot.type_count(), 2);
/// assert_eq!(snapshot.type_names(), vec!["Color", "StyleType"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// Snapshot contract version (populated from
    /// [`MODEL_CONTRACT_VERSION`](crate::MODEL_CONTRACT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Snapshot format version (semver string).
    pub version: String,
    /// Optional snapshot name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ISO-8601 timestamp of the extraction run.
    pub generated_at: String,
    /// Optional hash of the canonical type list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_hash: Option<String>,
    /// Canonical types in extraction order.
    pub types: Vec<ObjectType>,
}

impl ModelSnapshot {
    /// Creates an empty snapshot with required fields.
    pub fn new(version: impl Into<String>, generated_at: impl Into<String>) -> Self {
        Self {
            schema_version: Some(crate::MODEL_CONTRACT_VERSION.to_string()),
            version: version.into(),
            name: None,
            generated_at: generated_at.into(),
            bundle_hash: None,
            types: Vec::new(),
        }
    }

    /// Creates a snapshot around an existing model.
    pub fn with_types(
        version: impl Into<String>,
        generated_at: impl Into<String>,
        types: Vec<ObjectType>,
    ) -> Self {
        Self {
            types,
            ..Self::new(version, generated_at)
        }
    }

    /// Returns the number of types in this snapshot.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns type names in model order.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }
}
