//! Canonical type model definitions.
//!
//! This module defines the format-independent model produced by the
//! normalization engine and consumed by both code generators and the diff
//! engine. Field names serialize in camelCase so snapshots stay compatible
//! with the historical `gen.json` layout.

use serde::{Deserialize, Serialize};

use crate::tag::TypeTag;

/// Version of the snapshot contract (semver).
///
/// Embedded in every [`ModelSnapshot`](crate::ModelSnapshot) to track
/// compatibility across model versions.
pub const MODEL_CONTRACT_VERSION: &str = "1.0.0";

/// Type tag of the plain string scalar.
pub const STRING_TAG: &str = "String";

/// One field of an [`ObjectType`].
///
/// An empty `name` is reserved for the divider sentinel: a row that only
/// marks every following field as optional.
///
/// # Examples
///
/// ```
/// use apidoc_core::PropType;
///
/// let prop = PropType::new("windingRule", "String")
///     .with_enum_values(["EVENODD", "NONZERO"]);
/// assert!(prop.is_enum);
/// assert!(!prop.optional);
/// assert!(!prop.may_be_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropType {
    /// Field name (empty for the divider sentinel)
    pub name: String,
    /// Raw type tag as printed in the documentation
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Free-text description
    #[serde(default)]
    pub desc: String,
    /// Default value text
    #[serde(default)]
    pub default: String,
    /// Closed set of string literals (non-empty iff `is_enum`)
    #[serde(default)]
    pub enum_values: Vec<String>,
    /// Whether the value set is a closed string enumeration
    #[serde(default)]
    pub is_enum: bool,
    /// Whether the field may be absent
    #[serde(default)]
    pub optional: bool,
    /// Whether the value may be `null` even when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub may_be_null: Option<bool>,
}

impl PropType {
    /// Creates a required, non-enum field.
    pub fn new(name: &str, type_tag: &str) -> Self {
        Self {
            name: name.to_string(),
            type_tag: type_tag.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_desc(mut self, desc: &str) -> Self {
        self.desc = desc.to_string();
        self
    }

    /// Sets the enum literals and derives `is_enum` the way the field
    /// heuristic does: a `String` field with at least one literal.
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self.is_enum = self.type_tag == STRING_TAG && !self.enum_values.is_empty();
        self
    }

    /// Marks the field as optional.
    pub fn into_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the field as nullable.
    pub fn into_nullable(mut self) -> Self {
        self.may_be_null = Some(true);
        self
    }

    /// Returns `true` when the field value may be `null`.
    pub fn may_be_null(&self) -> bool {
        self.may_be_null.unwrap_or(false)
    }

    /// Returns `true` for the empty-named divider sentinel.
    pub fn is_divider(&self) -> bool {
        self.name.is_empty()
    }

    /// Parses the raw tag into a [`TypeTag`].
    pub fn tag(&self) -> TypeTag {
        TypeTag::parse(&self.type_tag)
    }
}

/// One named type of the documented API.
///
/// Either an object (with `props`, optionally extending one parent) or a
/// closed string enumeration (`is_enum`, empty `props`).
///
/// # Examples
///
/// ```
/// use apidoc_core::{ObjectType, PropType};
///
/// let frame = ObjectType::object("FRAME")
///     .extending("VECTOR")
///     .with_prop(PropType::new("children", "Node[]"));
/// assert_eq!(frame.parent(), Some("VECTOR"));
///
/// let rule = ObjectType::enumeration("WindingRule", ["EVENODD", "NONZERO"]);
/// assert!(rule.is_enum);
/// assert!(rule.props.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectType {
    /// Parent type name, empty for none
    #[serde(default)]
    pub extends: String,
    /// Unique name within a snapshot
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub desc: String,
    /// Ordered fields
    #[serde(default)]
    pub props: Vec<PropType>,
    /// Literals when the whole type is an enumeration
    #[serde(default)]
    pub enum_values: Vec<String>,
    /// Whether the whole type is a closed string enumeration
    #[serde(default)]
    pub is_enum: bool,
}

impl ObjectType {
    /// Creates an empty object type.
    pub fn object(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Creates an enumeration type.
    pub fn enumeration<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let enum_values: Vec<String> = values.into_iter().map(Into::into).collect();
        Self {
            name: name.to_string(),
            is_enum: !enum_values.is_empty(),
            enum_values,
            ..Default::default()
        }
    }

    /// Sets the parent type.
    pub fn extending(mut self, parent: &str) -> Self {
        self.extends = parent.to_string();
        self
    }

    /// Adds a description.
    pub fn with_desc(mut self, desc: &str) -> Self {
        self.desc = desc.to_string();
        self
    }

    /// Appends a field.
    pub fn with_prop(mut self, prop: PropType) -> Self {
        self.props.push(prop);
        self
    }

    /// Returns the parent type name, if any.
    pub fn parent(&self) -> Option<&str> {
        if self.extends.is_empty() {
            None
        } else {
            Some(self.extends.as_str())
        }
    }

    /// Finds a field by exact name.
    pub fn find_prop(&self, name: &str) -> Option<&PropType> {
        self.props.iter().find(|p| p.name == name)
    }

    /// Finds a field by exact name for mutation.
    pub fn find_prop_mut(&mut self, name: &str) -> Option<&mut PropType> {
        self.props.iter_mut().find(|p| p.name == name)
    }
}

/// Finds a type by exact name (first match).
pub fn find_type<'a>(model: &'a [ObjectType], name: &str) -> Option<&'a ObjectType> {
    model.iter().find(|t| t.name == name)
}

/// Finds a type by exact name for mutation (first match).
pub fn find_type_mut<'a>(model: &'a mut [ObjectType], name: &str) -> Option<&'a mut ObjectType> {
    model.iter_mut().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_enum_requires_string_tag() {
        let prop = PropType::new("kind", "Number").with_enum_values(["A"]);
        assert!(!prop.is_enum);

        let prop = PropType::new("kind", "String").with_enum_values(Vec::<String>::new());
        assert!(!prop.is_enum);
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let prop = PropType::new("fontPostScriptName", "String").into_nullable();
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json["type"], "String");
        assert_eq!(json["enumValues"], serde_json::json!([]));
        assert_eq!(json["isEnum"], false);
        assert_eq!(json["mayBeNull"], true);
    }

    #[test]
    fn test_may_be_null_omitted_when_absent() {
        let prop = PropType::new("x", "Number");
        let json = serde_json::to_string(&prop).unwrap();
        assert!(!json.contains("mayBeNull"));
    }

    #[test]
    fn test_deserialize_historical_layout() {
        let raw = r#"{
            "name": "Foo", "extends": "", "desc": "", "isEnum": false, "enumValues": [],
            "props": [{"name": "a", "type": "Number", "desc": "", "default": "",
                       "enumValues": [], "isEnum": false, "optional": false}]
        }"#;
        let obj: ObjectType = serde_json::from_str(raw).unwrap();
        assert_eq!(obj.name, "Foo");
        assert_eq!(obj.parent(), None);
        assert_eq!(obj.props[0].type_tag, "Number");
        assert_eq!(obj.props[0].may_be_null, None);
    }

    #[test]
    fn test_find_type_returns_first_match() {
        let model = vec![
            ObjectType::object("A").with_desc("first"),
            ObjectType::object("A").with_desc("second"),
        ];
        assert_eq!(find_type(&model, "A").unwrap().desc, "first");
        assert!(find_type(&model, "B").is_none());
    }
}
