//! Structured summary of one normalization run.

use serde::{Deserialize, Serialize};

use crate::heuristics::RowOutcome;

/// Counts and warnings collected while normalizing raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Raw rows consumed
    pub rows: usize,
    /// Types in the final model, synthetic entries included
    pub types: usize,
    /// Rows reclassified as whole-type enums
    pub enum_types: usize,
    /// Rows that gained a parent
    pub inherited_types: usize,
    /// Rows containing an optional-fields divider
    pub divider_types: usize,
    /// Fields classified as string enums
    pub enum_fields: usize,
    /// Synthetic types injected, in order
    pub synthetic_types: Vec<String>,
    /// Fields touched by the override tables
    pub overrides_applied: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl NormalizationReport {
    pub(crate) fn record(&mut self, outcome: &RowOutcome) {
        self.rows += 1;
        self.enum_types += usize::from(outcome.inline_enum && outcome.object.is_enum);
        self.inherited_types += usize::from(outcome.inherited);
        self.divider_types += usize::from(outcome.saw_divider);
        self.enum_fields += outcome.enum_fields;
        self.warnings.extend(outcome.warnings.iter().cloned());
    }
}
