//! Fatal normalization errors.

use std::fmt;

use thiserror::Error;

/// Which override table an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    MayBeNull,
    Optional,
}

impl fmt::Display for OverrideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MayBeNull => write!(f, "may_be_null"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

/// The scraped documentation no longer matches what the normalizer expects.
///
/// Raised instead of silently producing a model that drifts from the upstream
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionIntegrityError {
    #[error("{table} override names unknown type {type_name}")]
    UnknownOverrideType {
        table: OverrideKind,
        type_name: String,
    },

    #[error("{table} override names unknown field {type_name}.{field}")]
    UnknownOverrideField {
        table: OverrideKind,
        type_name: String,
        field: String,
    },

    #[error("synthetic type {synthetic} requires missing type {source_type}")]
    MissingSyntheticSource {
        synthetic: String,
        source_type: String,
    },

    #[error("cannot retarget missing field {type_name}.{field}")]
    MissingRetargetField { type_name: String, field: String },
}

pub type Result<T> = std::result::Result<T, ExtractionIntegrityError>;
