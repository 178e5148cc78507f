//! Code generators for the canonical API type model.
//!
//! Two independent emitters consume the same read-only model:
//!
//! - [`generate_typescript`]: interface/enum declarations plus the
//!   node-union footer.
//! - [`generate_schema`]: a JSON Schema draft-04 document with one
//!   definition per type.
//!
//! Both treat the node kinds in [`apidoc_core::NODE_KINDS`] as a closed
//! union discriminated by the `type` field, and both accept the same
//! nullable / optional flags, so the two artifacts describe the same data.

pub mod schema;
pub mod typescript;

pub use schema::{Items, JsonType, Schema, SchemaDocument, SchemaType, generate_schema};
pub use typescript::{NODE_BASE_INTERFACE, TsOptions, generate_typescript};

/// Type names both generators define without a model entry.
///
/// Pass to [`apidoc_core::find_unresolved_references`] so these do not show
/// up as dangling.
pub const BUILTIN_TYPES: [&str; 4] = ["Path", "StyleType", "PageInfo", schema::TRANSFORM];
