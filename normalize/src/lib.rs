//! Normalization of scraped API documentation into the canonical model.
//!
//! The scraper hands over one [`RawRow`] per documented type. This crate
//! applies the surface heuristics that recover structure from prose
//! ([`heuristics`]), injects the types the documentation never describes
//! ([`synthetic`]), and merges the manual override tables
//! ([`OverrideTables`]). The result is a canonical model plus a
//! [`NormalizationReport`].
//!
//! Any mismatch between the documentation and the fixed expectations of
//! this pipeline is an [`ExtractionIntegrityError`].
//!
//! # Example
//!
//! ```
//! use apidoc_normalize::{normalize_rows, OverrideTables, RawField, RawRow};
//!
//! let rows = vec![
//!     RawRow::new("TypeStyle").with_field(RawField::new("fontFamily", "String", "Font family")),
//!     RawRow::new("TEXT")
//!         .with_field(RawField::new("", "", "See properties for VECTOR"))
//!         .with_field(RawField::new("styleOverrideTable", "Map<Number,TypeStyle>", "")),
//! ];
//!
//! let run = normalize_rows(&rows, &OverrideTables::empty()).unwrap();
//! let text = run.model.iter().find(|t| t.name == "TEXT").unwrap();
//! assert_eq!(text.extends, "VECTOR");
//! assert_eq!(text.props[0].type_tag, "TypeStylePartial");
//! assert_eq!(run.report.synthetic_types.len(), 4);
//! ```

pub mod error;
pub mod heuristics;
pub mod output;
pub mod overrides;
pub mod raw;
pub mod report;
pub mod synthetic;

use apidoc_core::{ModelSnapshot, ObjectType};
use tracing::{info, warn};

pub use error::{ExtractionIntegrityError, OverrideKind, Result};
pub use output::OutputFormat;
pub use overrides::{OverrideTable, OverrideTables, apply_overrides};
pub use raw::{RawField, RawRow};
pub use report::NormalizationReport;
pub use synthetic::inject_synthetic_types;

/// Canonical model and report produced by [`normalize_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationRun {
    pub model: Vec<ObjectType>,
    pub report: NormalizationReport,
}

impl NormalizationRun {
    /// Wraps the model in a snapshot stamped with the current time.
    pub fn into_snapshot(self, version: &str) -> ModelSnapshot {
        ModelSnapshot::with_types(version, chrono::Utc::now().to_rfc3339(), self.model)
    }
}

/// Runs the full normalization pipeline: per-row heuristics, synthetic
/// injection, then the override tables.
pub fn normalize_rows(rows: &[RawRow], overrides: &OverrideTables) -> Result<NormalizationRun> {
    let mut report = NormalizationReport::default();
    let mut model = Vec::with_capacity(rows.len() + 4);

    for row in rows {
        let outcome = heuristics::normalize_row(row);
        report.record(&outcome);
        model.push(outcome.object);
    }

    report.synthetic_types = inject_synthetic_types(&mut model)?;
    if overrides.is_empty() {
        warn!("Override tables are empty, documented nullability is used as-is");
        report
            .warnings
            .push("override tables are empty, no fields were corrected".to_string());
    }
    report.overrides_applied = apply_overrides(&mut model, overrides)?;
    report.types = model.len();

    info!(
        rows = report.rows,
        types = report.types,
        overrides = report.overrides_applied,
        warnings = report.warnings.len(),
        "Normalized documentation rows"
    );

    Ok(NormalizationRun { model, report })
}

/// Parses raw rows from the scraper's JSON output.
pub fn parse_raw_rows(json: &str) -> std::result::Result<Vec<RawRow>, serde_json::Error> {
    serde_json::from_str(json)
}
