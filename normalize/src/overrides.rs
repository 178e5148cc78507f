//! Manual corrections the documentation gets wrong.
//!
//! Two tables map a type name to field names: one forces `mayBeNull`, the
//! other forces `optional`. Every entry must name an existing type and field
//! so that a renamed upstream field fails the run instead of being ignored.

use std::collections::BTreeMap;

use apidoc_core::{ObjectType, find_type_mut};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractionIntegrityError, OverrideKind, Result};

/// Type name to field names.
pub type OverrideTable = BTreeMap<String, Vec<String>>;

/// The nullable and optional override tables.
///
/// Each table defaults to the built-in corrections when absent from a
/// config file. Write an empty map to disable one.
///
/// # Examples
///
/// ```
/// use apidoc_normalize::OverrideTables;
///
/// let tables = OverrideTables::default();
/// assert_eq!(tables.may_be_null["TypeStyle"], vec!["fontPostScriptName"]);
/// assert_eq!(tables.optional["Paint"], vec!["visible", "opacity"]);
/// assert!(OverrideTables::empty().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideTables {
    #[serde(default = "builtin_may_be_null")]
    pub may_be_null: OverrideTable,
    #[serde(default = "builtin_optional")]
    pub optional: OverrideTable,
}

impl Default for OverrideTables {
    fn default() -> Self {
        Self {
            may_be_null: builtin_may_be_null(),
            optional: builtin_optional(),
        }
    }
}

impl OverrideTables {
    /// Tables with no entries.
    pub fn empty() -> Self {
        Self {
            may_be_null: OverrideTable::new(),
            optional: OverrideTable::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.may_be_null.values().all(Vec::is_empty) && self.optional.values().all(Vec::is_empty)
    }
}

fn table(entries: &[(&str, &[&str])]) -> OverrideTable {
    entries
        .iter()
        .map(|(type_name, fields)| {
            (
                type_name.to_string(),
                fields.iter().map(|f| f.to_string()).collect(),
            )
        })
        .collect()
}

fn builtin_may_be_null() -> OverrideTable {
    table(&[
        ("TypeStyle", &["fontPostScriptName"]),
        ("CANVAS", &["prototypeStartNodeID"]),
    ])
}

fn builtin_optional() -> OverrideTable {
    table(&[
        (
            "TypeStyle",
            &[
                "lineHeightPercentFontSize",
                "paragraphIndent",
                "italic",
                "textCase",
                "textDecoration",
                "fills",
                "paragraphSpacing",
            ],
        ),
        ("Paint", &["visible", "opacity"]),
    ])
}

/// Applies both tables, nullable first. Returns the number of fields touched.
pub fn apply_overrides(model: &mut [ObjectType], tables: &OverrideTables) -> Result<usize> {
    let nullable = apply_table(model, &tables.may_be_null, OverrideKind::MayBeNull)?;
    let optional = apply_table(model, &tables.optional, OverrideKind::Optional)?;
    Ok(nullable + optional)
}

fn apply_table(
    model: &mut [ObjectType],
    entries: &OverrideTable,
    kind: OverrideKind,
) -> Result<usize> {
    let mut applied = 0;
    for (type_name, fields) in entries {
        let object = find_type_mut(model, type_name).ok_or_else(|| {
            ExtractionIntegrityError::UnknownOverrideType {
                table: kind,
                type_name: type_name.clone(),
            }
        })?;

        for field in fields {
            let prop = object.find_prop_mut(field).ok_or_else(|| {
                ExtractionIntegrityError::UnknownOverrideField {
                    table: kind,
                    type_name: type_name.clone(),
                    field: field.clone(),
                }
            })?;
            match kind {
                OverrideKind::MayBeNull => prop.may_be_null = Some(true),
                OverrideKind::Optional => prop.optional = true,
            }
            debug!(table = %kind, type_name = %type_name, field = %field, "Applied override");
            applied += 1;
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use apidoc_core::{PropType, find_type};

    use super::*;

    fn model() -> Vec<ObjectType> {
        vec![
            ObjectType::object("Paint")
                .with_prop(PropType::new("visible", "Boolean"))
                .with_prop(PropType::new("opacity", "Number"))
                .with_prop(PropType::new("color", "Color")),
            ObjectType::object("CANVAS").with_prop(PropType::new("prototypeStartNodeID", "String")),
        ]
    }

    fn tables(may_be_null: &[(&str, &[&str])], optional: &[(&str, &[&str])]) -> OverrideTables {
        OverrideTables {
            may_be_null: table(may_be_null),
            optional: table(optional),
        }
    }

    #[test]
    fn test_apply_overrides_sets_flags() {
        let mut model = model();
        let overrides = tables(
            &[("CANVAS", &["prototypeStartNodeID"])],
            &[("Paint", &["visible", "opacity"])],
        );

        let applied = apply_overrides(&mut model, &overrides).unwrap();
        assert_eq!(applied, 3);

        let paint = find_type(&model, "Paint").unwrap();
        assert!(paint.find_prop("visible").unwrap().optional);
        assert!(paint.find_prop("opacity").unwrap().optional);
        assert!(!paint.find_prop("color").unwrap().optional);

        let canvas = find_type(&model, "CANVAS").unwrap();
        assert!(canvas.find_prop("prototypeStartNodeID").unwrap().may_be_null());
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let mut model = model();
        let overrides = tables(&[("Missing", &["x"])], &[]);
        assert_eq!(
            apply_overrides(&mut model, &overrides),
            Err(ExtractionIntegrityError::UnknownOverrideType {
                table: OverrideKind::MayBeNull,
                type_name: "Missing".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_field_is_fatal() {
        let mut model = model();
        let overrides = tables(&[], &[("Paint", &["blendMode"])]);
        let err = apply_overrides(&mut model, &overrides).unwrap_err();
        assert_eq!(
            err.to_string(),
            "optional override names unknown field Paint.blendMode"
        );
    }

    #[test]
    fn test_missing_config_sections_fall_back_to_builtins() {
        let tables: OverrideTables =
            serde_yaml::from_str("optional:\n  Paint: [visible]\n").unwrap();
        assert_eq!(tables.may_be_null, builtin_may_be_null());
        assert_eq!(tables.optional.len(), 1);

        let tables: OverrideTables = serde_yaml::from_str("may_be_null: {}\n").unwrap();
        assert!(tables.may_be_null.is_empty());
        assert_eq!(tables.optional, builtin_optional());
    }
}
