//! Model and snapshot validation.
//!
//! Checks the structural invariants of a canonical model: non-empty unique
//! type names and the enum invariants on types and fields. Dangling type
//! references are reported separately by [`find_unresolved_references`]
//! because they are latent rather than structural.
//!
//! # Examples
//!
//! ```
//! use apidoc_core::*;
//!
//! let model = vec![ObjectType::object("Foo").with_prop(PropType::new("a", "Number"))];
//! assert!(validate_model(&model).is_empty());
//!
//! // Duplicate names are only caught here; keyed maps silently keep the last one.
//! let dup = vec![ObjectType::object("Foo"), ObjectType::object("Foo")];
//! assert_eq!(validate_model(&dup), vec![ValidationError::DuplicateType("Foo".into())]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{ModelSnapshot, ObjectType, STRING_TAG};

/// Model/snapshot validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Snapshot version string is empty.
    #[error("snapshot version cannot be empty")]
    EmptySnapshotVersion,
    /// Type name is empty or whitespace-only.
    #[error("type name cannot be empty")]
    EmptyTypeName,
    /// Two types in the same model share a name.
    #[error("duplicate type in model: {0}")]
    DuplicateType(String),
    /// An enumeration type also declares fields.
    #[error("enum type has fields: {0}")]
    EnumTypeWithProps(String),
    /// `isEnum` disagrees with whether `enumValues` is empty (a field may
    /// keep literals without being an enum).
    #[error("enum flag does not match enum values: {0}")]
    EnumFlagMismatch(String),
    /// An enum field whose tag is not the string scalar.
    #[error("enum field {0} is not typed String")]
    EnumFieldNotString(String),
}

/// A type reference that no model type (or generator built-in) satisfies.
///
/// Never fatal: the generated artifact simply carries a dangling name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// Owning type
    pub type_name: String,
    /// Referencing field, `None` for an unresolved `extends`
    pub field: Option<String>,
    /// Name that failed to resolve
    pub target: String,
}

/// Validates a snapshot: version metadata plus [`validate_model`].
pub fn validate_snapshot(snapshot: &ModelSnapshot) -> Vec<ValidationError> {
    if snapshot.version.trim().is_empty() {
        return vec![ValidationError::EmptySnapshotVersion];
    }
    validate_model(&snapshot.types)
}

/// Validates a canonical model, returning every violation found.
pub fn validate_model(model: &[ObjectType]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for obj in model {
        let name = obj.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyTypeName);
            continue;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateType(name.to_string()));
        }

        if obj.is_enum && !obj.props.is_empty() {
            errors.push(ValidationError::EnumTypeWithProps(name.to_string()));
        }
        if obj.is_enum == obj.enum_values.is_empty() {
            errors.push(ValidationError::EnumFlagMismatch(name.to_string()));
        }

        for prop in obj.props.iter().filter(|p| !p.is_divider()) {
            let path = format!("{name}.{}", prop.name);
            if prop.is_enum && prop.type_tag != STRING_TAG {
                errors.push(ValidationError::EnumFieldNotString(path.clone()));
            }
            // Non-string fields may carry scraped literals without being enums.
            if prop.is_enum && prop.enum_values.is_empty() {
                errors.push(ValidationError::EnumFlagMismatch(path));
            }
        }
    }

    errors
}

/// Lists every `extends` and field type reference that resolves neither to
/// a model type nor to one of `builtins`.
///
/// Enum fields are skipped: generators emit a synthetic enum for them and
/// never consult their tag.
pub fn find_unresolved_references(
    model: &[ObjectType],
    builtins: &[&str],
) -> Vec<UnresolvedReference> {
    let known: HashSet<&str> = model
        .iter()
        .map(|t| t.name.as_str())
        .chain(builtins.iter().copied())
        .collect();

    let mut unresolved = Vec::new();
    for obj in model {
        if let Some(parent) = obj.parent()
            && !known.contains(parent)
        {
            unresolved.push(UnresolvedReference {
                type_name: obj.name.clone(),
                field: None,
                target: parent.to_string(),
            });
        }

        for prop in obj.props.iter().filter(|p| !p.is_divider() && !p.is_enum) {
            let tag = prop.tag();
            if let Some(target) = tag.referenced_type()
                && !known.contains(target)
            {
                unresolved.push(UnresolvedReference {
                    type_name: obj.name.clone(),
                    field: Some(prop.name.clone()),
                    target: target.to_string(),
                });
            }
        }
    }
    unresolved
}

#[cfg(test)]
mod tests {
    use crate::PropType;

    use super::*;

    #[test]
    fn test_validate_model_accepts_valid_model() {
        let model = vec![
            ObjectType::object("Path")
                .with_prop(PropType::new("path", "String"))
                .with_prop(PropType::new("windingRule", "String").with_enum_values(["EVENODD"])),
            ObjectType::enumeration("StyleType", ["FILL", "TEXT"]),
        ];
        assert!(validate_model(&model).is_empty());
    }

    #[test]
    fn test_validate_model_rejects_enum_with_props() {
        let mut obj = ObjectType::enumeration("E", ["A"]);
        obj.props.push(PropType::new("x", "Number"));
        assert_eq!(
            validate_model(&[obj]),
            vec![ValidationError::EnumTypeWithProps("E".to_string())]
        );
    }

    #[test]
    fn test_validate_model_rejects_non_string_enum_field() {
        let mut prop = PropType::new("mode", "Number");
        prop.enum_values = vec!["A".to_string()];
        prop.is_enum = true;
        let model = vec![ObjectType::object("T").with_prop(prop)];
        assert_eq!(
            validate_model(&model),
            vec![ValidationError::EnumFieldNotString("T.mode".to_string())]
        );
    }

    #[test]
    fn test_validate_model_ignores_divider() {
        let model = vec![ObjectType::object("T").with_prop(PropType::new("", ""))];
        assert!(validate_model(&model).is_empty());
    }

    #[test]
    fn test_validate_snapshot_rejects_empty_version() {
        let snapshot = ModelSnapshot::new(" ", "2026-01-01T00:00:00Z");
        assert_eq!(
            validate_snapshot(&snapshot),
            vec![ValidationError::EmptySnapshotVersion]
        );
    }

    #[test]
    fn test_find_unresolved_references() {
        let model = vec![
            ObjectType::object("FRAME")
                .extending("VECTOR")
                .with_prop(PropType::new("fills", "Paint[]"))
                .with_prop(PropType::new("transform", "Transform"))
                .with_prop(PropType::new("blendMode", "String").with_enum_values(["NORMAL"])),
            ObjectType::object("Paint"),
        ];

        let unresolved = find_unresolved_references(&model, &["Transform"]);
        assert_eq!(
            unresolved,
            vec![UnresolvedReference {
                type_name: "FRAME".to_string(),
                field: None,
                target: "VECTOR".to_string(),
            }]
        );
    }
}
