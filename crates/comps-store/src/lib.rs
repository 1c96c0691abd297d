//! Persistent storage for comp sets and read access to the canonical dataset.
//!
//! # Layout
//!
//! - `store` - one JSON file per comp set, keyed by the sanitized name
//! - `canonical` - the extraction run's `comparables_data.json`
//! - `locks` - per-name mutual exclusion for read-modify-write cycles
//! - `paths` - default locations and their environment overrides

mod canonical;
mod error;
mod locks;
pub mod paths;
mod store;

pub use canonical::load_comparables;
pub use error::{Result, StoreError};
pub use locks::KeyedLocks;
pub use store::{CURRENT_SCHEMA_VERSION, CompSetStore};
