//! Snapshot and raw-row file loading.
//!
//! Snapshot files are JSON unless the extension is `.yaml` / `.yml`. A file
//! holds either a [`ModelSnapshot`] bundle or, in the historical layout, a
//! bare array of types:
//!
//! ```no_run
//! use apidoc_store::{load_snapshot, save_snapshot, seal_snapshot};
//!
//! let mut snapshot = load_snapshot("gen.json").unwrap();
//! seal_snapshot(&mut snapshot).unwrap();
//! save_snapshot(&snapshot, "model.yaml").unwrap();
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use apidoc_core::{ModelSnapshot, ObjectType};
use apidoc_normalize::RawRow;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, StoreError};

/// Version assigned to snapshots loaded from a bare type array.
pub const UNVERSIONED: &str = "0.0.0";

/// Serialization format chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// `.yaml` / `.yml` select YAML; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Computes the SHA-256 fingerprint of a type list's canonical JSON.
pub fn snapshot_hash(types: &[ObjectType]) -> Result<String> {
    let bytes = serde_json::to_vec(types)?;
    let hash = Sha256::digest(&bytes);
    Ok(format!("{:x}", hash))
}

/// Stores the current fingerprint in `bundle_hash`.
pub fn seal_snapshot(snapshot: &mut ModelSnapshot) -> Result<()> {
    snapshot.bundle_hash = Some(snapshot_hash(&snapshot.types)?);
    Ok(())
}

/// Loads a snapshot bundle or bare type array.
///
/// # Errors
///
/// Returns [`StoreError::IoError`] if the file cannot be read, a parse error
/// for malformed content, [`StoreError::InvalidSnapshot`] for a document that
/// is neither layout, or [`StoreError::HashMismatch`] when a stored
/// `bundle_hash` no longer matches the types.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<ModelSnapshot> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let snapshot = match FileFormat::from_path(path) {
        FileFormat::Json => {
            let value: serde_json::Value = serde_json::from_reader(reader)?;
            match value {
                serde_json::Value::Array(_) => bare(serde_json::from_value(value)?),
                serde_json::Value::Object(_) => serde_json::from_value(value)?,
                _ => return Err(not_a_snapshot(path)),
            }
        }
        FileFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
            match value {
                serde_yaml::Value::Sequence(_) => bare(serde_yaml::from_value(value)?),
                serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value)?,
                _ => return Err(not_a_snapshot(path)),
            }
        }
    };

    verify_hash(&snapshot)?;
    debug!(path = %path.display(), types = snapshot.type_count(), "Loaded snapshot");
    Ok(snapshot)
}

fn bare(types: Vec<ObjectType>) -> ModelSnapshot {
    ModelSnapshot::with_types(UNVERSIONED, "", types)
}

fn not_a_snapshot(path: &Path) -> StoreError {
    StoreError::InvalidSnapshot(format!(
        "{} holds neither a snapshot bundle nor a type array",
        path.display()
    ))
}

fn verify_hash(snapshot: &ModelSnapshot) -> Result<()> {
    let Some(expected) = &snapshot.bundle_hash else {
        return Ok(());
    };
    let actual = snapshot_hash(&snapshot.types)?;
    if *expected != actual {
        return Err(StoreError::HashMismatch {
            expected: expected.clone(),
            actual,
        });
    }
    Ok(())
}

/// Writes a snapshot as pretty JSON or YAML, chosen by extension.
pub fn save_snapshot(snapshot: &ModelSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);
    match FileFormat::from_path(path) {
        FileFormat::Json => serde_json::to_writer_pretty(writer, snapshot)?,
        FileFormat::Yaml => serde_yaml::to_writer(writer, snapshot)?,
    }
    Ok(())
}

/// Loads the scraper's raw rows (JSON).
pub fn load_raw_rows(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);
    let rows = serde_json::from_reader(reader)?;
    Ok(rows)
}
