//! Configuration and snapshot persistence.
//!
//! - [`GenConfig`]: YAML generator configuration (override tables, schema
//!   root properties, TypeScript emitter switches, snapshot metadata).
//! - [`load_snapshot`] / [`save_snapshot`]: JSON or YAML snapshot files,
//!   including the historical bare-array layout.
//! - [`snapshot_hash`]: SHA-256 fingerprint stored as `bundle_hash`.
//!
//! # Quick start
//!
//! ```no_run
//! use apidoc_store::{GenConfig, load_raw_rows, load_snapshot};
//!
//! let config = GenConfig::load("apidoc.yml").unwrap();
//! let rows = load_raw_rows("rows.json").unwrap();
//! let previous = load_snapshot("gen.json").unwrap();
//! println!("{} rows, {} known types", rows.len(), previous.type_count());
//! # let _ = config;
//! ```

mod config;
mod error;
mod loader;

pub use config::{GenConfig, SchemaConfig, SnapshotConfig};
pub use error::{Result, StoreError};
pub use loader::{
    FileFormat, UNVERSIONED, load_raw_rows, load_snapshot, save_snapshot, seal_snapshot,
    snapshot_hash,
};
