//! Parsed view of the free-text type tags printed by the documentation.
//!
//! Tags are stored verbatim in the model; both generators go through
//! [`TypeTag::parse`] so they agree on what is a scalar, a pseudo-generic map,
//! an array, or a plain reference to another type.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Suffix marking an array of the preceding tag.
pub const ARRAY_SUFFIX: &str = "[]";

/// Scalar tags understood by both generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Number,
    String,
    Boolean,
    /// Unconstrained value.
    Any,
}

impl Scalar {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Number" => Some(Self::Number),
            "String" => Some(Self::String),
            "Boolean" => Some(Self::Boolean),
            "Any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Structured type tag.
///
/// # Examples
///
/// ```
/// use apidoc_core::{Scalar, TypeTag};
///
/// assert_eq!(TypeTag::parse("Number"), TypeTag::Scalar(Scalar::Number));
/// assert_eq!(TypeTag::parse("Map<StyleType, String>"), TypeTag::StyleMap);
/// assert_eq!(TypeTag::parse("Map<Number,TypeStyle>"), TypeTag::TypeStyleMap);
/// assert_eq!(
///     TypeTag::parse("Paint[]"),
///     TypeTag::Array(Box::new(TypeTag::Reference("Paint".into())))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Scalar(Scalar),
    /// `Map<StyleType, String>`: a fixed four-key style-kind dictionary.
    StyleMap,
    /// `Map<Number,TypeStyle>`: numeric ids to `TypeStyle` overrides.
    TypeStyleMap,
    /// `X[]`.
    Array(Box<TypeTag>),
    /// Anything else names another type directly.
    Reference(String),
}

static MAP_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Map<\s*(\w+)\s*,\s*(\w+)\s*>$").expect("static regex must compile")
});

impl TypeTag {
    /// Parses a raw documentation tag. Never fails: unknown tags become
    /// references.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(inner) = raw.strip_suffix(ARRAY_SUFFIX) {
            return Self::Array(Box::new(Self::parse(inner)));
        }
        if let Some(scalar) = Scalar::from_tag(raw) {
            return Self::Scalar(scalar);
        }
        if let Some(caps) = MAP_TAG_RE.captures(raw) {
            match (&caps[1], &caps[2]) {
                ("StyleType", "String") => return Self::StyleMap,
                ("Number", "TypeStyle") => return Self::TypeStyleMap,
                _ => {}
            }
        }
        Self::Reference(raw.to_string())
    }

    /// Returns the name of the model type this tag depends on, if any.
    ///
    /// `StyleMap` keys are a fixed literal set and reference nothing.
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) | Self::StyleMap => None,
            Self::TypeStyleMap => Some("TypeStyle"),
            Self::Array(inner) => inner.referenced_type(),
            Self::Reference(name) => Some(name.as_str()),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(Scalar::Number) => write!(f, "Number"),
            Self::Scalar(Scalar::String) => write!(f, "String"),
            Self::Scalar(Scalar::Boolean) => write!(f, "Boolean"),
            Self::Scalar(Scalar::Any) => write!(f, "Any"),
            Self::StyleMap => write!(f, "Map<StyleType, String>"),
            Self::TypeStyleMap => write!(f, "Map<Number,TypeStyle>"),
            Self::Array(inner) => write!(f, "{inner}{ARRAY_SUFFIX}"),
            Self::Reference(name) => write!(f, "{name}"),
        }
    }
}
