//! Surface heuristics that turn one scraped row into an [`ObjectType`].
//!
//! The documentation encodes structure in prose. Each heuristic keys on an
//! exact phrase at the start of a field description:
//!
//! | Phrase | Effect |
//! |--------|--------|
//! | `The following properties`, `For ` | divider: later fields are optional |
//! | `See properties for X` | type extends `X` |
//! | `Has all the properties of X, ...` | type extends `X` |
//! | `This type is a string enum with the following possible values` | whole type is an enum |

use apidoc_core::{ObjectType, PropType, STRING_TAG};
use tracing::{debug, warn};

use crate::raw::{RawField, RawRow};

const DIVIDER_PREFIXES: [&str; 2] = ["The following properties", "For "];
const SEE_PROPERTIES_FOR: &str = "See properties for ";
const HAS_ALL_PROPERTIES_OF: &str = "Has all the properties of ";
const STRING_ENUM_MARKER: &str = "This type is a string enum with the following possible values";

/// Result of normalizing one row, with the flags the report counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub object: ObjectType,
    pub saw_divider: bool,
    pub inherited: bool,
    pub inline_enum: bool,
    pub enum_fields: usize,
    pub warnings: Vec<String>,
}

/// Applies every per-row heuristic in order: divider fold, inheritance,
/// inline enum.
pub fn normalize_row(row: &RawRow) -> RowOutcome {
    let saw_divider = row.fields.iter().any(|f| is_divider(&f.desc));
    let mut props = fold_fields(&row.fields);
    let mut warnings = Vec::new();

    let extends = match take_parent(&mut props) {
        Some(ParentLink::Named(parent)) => {
            debug!(type_name = %row.name, parent = %parent, "Detected parent type");
            parent
        }
        Some(ParentLink::Unterminated(text)) => {
            warn!(
                type_name = %row.name,
                text = %text,
                "Inheritance phrase without comma, parent left empty"
            );
            warnings.push(format!(
                "{}: inheritance phrase without comma, parent left empty: {text}",
                row.name
            ));
            String::new()
        }
        None => String::new(),
    };
    let inherited = !extends.is_empty();

    let mut object = ObjectType {
        extends,
        name: row.name.clone(),
        desc: row.desc.clone(),
        props,
        enum_values: Vec::new(),
        is_enum: false,
    };

    let inline_enum = take_inline_enum(&mut object);
    if inline_enum {
        debug!(type_name = %object.name, values = ?object.enum_values, "Reclassified type as enum");
    }

    let enum_fields = object.props.iter().filter(|p| p.is_enum).count();

    RowOutcome {
        object,
        saw_divider,
        inherited,
        inline_enum,
        enum_fields,
        warnings,
    }
}

fn is_divider(desc: &str) -> bool {
    DIVIDER_PREFIXES.iter().any(|prefix| desc.starts_with(prefix))
}

/// Converts field rows in document order. A divider row is dropped and every
/// field after it becomes optional.
pub fn fold_fields(fields: &[RawField]) -> Vec<PropType> {
    let (_, props) = fields.iter().fold(
        (false, Vec::with_capacity(fields.len())),
        |(after_divider, mut props), field| {
            if is_divider(&field.desc) {
                return (true, props);
            }
            props.push(to_prop(field, after_divider));
            (after_divider, props)
        },
    );
    props
}

fn to_prop(field: &RawField, optional: bool) -> PropType {
    let is_enum = field.type_tag == STRING_TAG && !field.enum_values.is_empty();
    PropType {
        name: field.name.clone(),
        type_tag: field.type_tag.clone(),
        desc: field.desc.clone(),
        default: field.default_text().to_string(),
        enum_values: field.enum_values.clone(),
        is_enum,
        optional,
        may_be_null: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParentLink {
    Named(String),
    /// `Has all the properties of` with no comma to end the name
    Unterminated(String),
}

/// Removes the first inheritance marker field and extracts the parent name.
fn take_parent(props: &mut Vec<PropType>) -> Option<ParentLink> {
    let index = props.iter().position(|p| {
        p.desc.starts_with(SEE_PROPERTIES_FOR) || p.desc.starts_with(HAS_ALL_PROPERTIES_OF)
    })?;
    let marker = props.remove(index);

    if let Some(rest) = marker.desc.strip_prefix(SEE_PROPERTIES_FOR) {
        return Some(ParentLink::Named(rest.trim().to_string()));
    }

    let rest = marker
        .desc
        .strip_prefix(HAS_ALL_PROPERTIES_OF)
        .unwrap_or_default()
        .trim();
    match rest.find(',') {
        Some(comma) => Some(ParentLink::Named(rest[..comma].to_string())),
        None => Some(ParentLink::Unterminated(rest.to_string())),
    }
}

/// Turns a two-field "string enum" table into an enumeration type.
fn take_inline_enum(object: &mut ObjectType) -> bool {
    if object.props.len() != 2 || object.props[0].desc != STRING_ENUM_MARKER {
        return false;
    }
    let values = std::mem::take(&mut object.props[1].enum_values);
    object.props.clear();
    object.is_enum = !values.is_empty();
    object.enum_values = values;
    true
}
