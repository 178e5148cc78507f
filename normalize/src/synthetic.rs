//! Types the documentation references but never documents.
//!
//! These entries are authoritative: they replace any same-named scraped type.

use apidoc_core::{ObjectType, PropType, find_type, find_type_mut};
use tracing::debug;

use crate::error::{ExtractionIntegrityError, Result};

pub const PATH_TYPE: &str = "Path";
pub const STYLE_TYPE: &str = "StyleType";
pub const PAGE_INFO_TYPE: &str = "PageInfo";
pub const PARTIAL_SOURCE_TYPE: &str = "TypeStyle";
pub const PARTIAL_TYPE: &str = "TypeStylePartial";
pub const RETARGET_OWNER: &str = "TEXT";
pub const RETARGET_FIELD: &str = "styleOverrideTable";

/// Fixed synthetic types that need no source in the scraped model.
pub fn fixed_synthetic_types() -> Vec<ObjectType> {
    vec![
        ObjectType::object(PATH_TYPE)
            .with_desc("A vector svg path")
            .with_prop(
                PropType::new("path", "String")
                    .with_desc("A sequence of path commands in SVG notation"),
            )
            .with_prop(
                PropType::new("windingRule", "String")
                    .with_desc(r#"Winding rule for the path, either "EVENODD" or "NONZERO""#)
                    .with_enum_values(["EVENODD", "NONZERO"]),
            ),
        ObjectType::enumeration(STYLE_TYPE, ["FILL", "TEXT", "EFFECT", "GRID"]),
        ObjectType::object(PAGE_INFO_TYPE).with_desc(
            "UNDOCUMENTED\nData on component's containing page, if component resides in a multi-page file",
        ),
    ]
}

/// Injects the synthetic types and retargets the text style override table.
///
/// Returns the names of the injected types in injection order.
pub fn inject_synthetic_types(model: &mut Vec<ObjectType>) -> Result<Vec<String>> {
    let mut injected = Vec::new();

    for object in fixed_synthetic_types() {
        injected.push(object.name.clone());
        upsert(model, object);
    }

    let mut partial = find_type(model, PARTIAL_SOURCE_TYPE)
        .cloned()
        .ok_or_else(|| ExtractionIntegrityError::MissingSyntheticSource {
            synthetic: PARTIAL_TYPE.to_string(),
            source_type: PARTIAL_SOURCE_TYPE.to_string(),
        })?;
    partial.name = PARTIAL_TYPE.to_string();
    for prop in &mut partial.props {
        prop.optional = true;
    }
    injected.push(partial.name.clone());
    upsert(model, partial);

    let field = find_type_mut(model, RETARGET_OWNER)
        .and_then(|owner| owner.find_prop_mut(RETARGET_FIELD))
        .ok_or_else(|| ExtractionIntegrityError::MissingRetargetField {
            type_name: RETARGET_OWNER.to_string(),
            field: RETARGET_FIELD.to_string(),
        })?;
    field.type_tag = PARTIAL_TYPE.to_string();
    debug!(
        owner = RETARGET_OWNER,
        field = RETARGET_FIELD,
        target = PARTIAL_TYPE,
        "Retargeted field"
    );

    Ok(injected)
}

/// Replaces the first same-named entry in place (dropping later duplicates),
/// else appends.
fn upsert(model: &mut Vec<ObjectType>, object: ObjectType) {
    match model.iter().position(|t| t.name == object.name) {
        Some(index) => {
            let name = object.name.clone();
            debug!(type_name = %name, "Replacing scraped type with synthetic entry");
            model[index] = object;
            let mut seen = 0usize;
            model.retain(|t| {
                if t.name != name {
                    return true;
                }
                seen += 1;
                seen == 1
            });
        }
        None => model.push(object),
    }
}
