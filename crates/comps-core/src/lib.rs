//! Comp set lifecycle over the file store.
//!
//! [`CompSetService`] is the single entry point used by the HTTP server and
//! the command line. It validates names and selections, serializes
//! read-modify-write cycles per comp set, and joins stored entries against
//! the canonical comparables dataset on read.

pub mod enrich;
pub mod error;
pub mod service;

pub use enrich::{enrich, mark_all_missing};
pub use error::{CompsError, ErrorKind, Result};
pub use service::{CompSetService, CompSetView, UpdateCompSet, UpdateOutcome};
