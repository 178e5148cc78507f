//! Canonical type model for scraped API documentation.
//!
//! This crate defines the format-independent model that sits between the
//! documentation scraper and the code generators:
//!
//! - [`ObjectType`]: one named type, either an object with ordered fields and an
//!   optional single parent, or a closed string enumeration.
//! - [`PropType`]: one field, with its raw type tag, enum literals and the
//!   optional / nullable flags.
//! - [`TypeTag`]: parsed view of a raw tag (scalar, pseudo-generic map,
//!   array, or reference).
//! - [`ModelSnapshot`]: a versioned bundle of types for persistence.
//!
//! Validation ([`validate_model`], [`validate_snapshot`]) catches duplicate
//! names and broken enum invariants; [`find_unresolved_references`] reports
//! dangling type references without failing.
//!
//! Diffing ([`diff_models`]) compares two snapshots keyed by type name and
//! flattens the result to dotted paths.
//!
//! # Example
//!
//! ```
//! use apidoc_core::*;
//!
//! let model = vec![
//!     ObjectType::object("Foo").with_prop(PropType::new("a", "Number")),
//!     ObjectType::object("Bar").extending("Foo"),
//! ];
//!
//! assert!(validate_model(&model).is_empty());
//! assert!(find_unresolved_references(&model, &[]).is_empty());
//! assert!(diff_models(&model, &model).is_empty());
//! ```

mod diff;
mod nodes;
mod snapshot;
mod tag;
mod types;
mod validate;

pub use diff::{DeletedEntry, DiffEntry, ModelDiff, diff_models};
pub use nodes::{NODE_BASE_TYPE, NODE_DISCRIMINANT, NODE_KINDS, NodeKind};
pub use snapshot::ModelSnapshot;
pub use tag::{ARRAY_SUFFIX, Scalar, TypeTag};
pub use types::*;
pub use validate::{
    UnresolvedReference, ValidationError, find_unresolved_references, validate_model,
    validate_snapshot,
};
