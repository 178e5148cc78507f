//! Error types for configuration and snapshot persistence.

use thiserror::Error;

/// Errors that can occur while reading or writing store files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Snapshot file is structurally invalid.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Stored bundle hash does not match the type list.
    #[error("bundle hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
