//! Data model for comparable properties and comp sets.

pub mod comp_set;
pub mod error;
pub mod identity;
pub mod name;
pub mod notes;
pub mod property;
pub mod stats;

pub use comp_set::{CompSet, CompSetListItem, CompSetProperty};
pub use error::{ModelError, Result};
pub use identity::{Identify, identify, merge, validate_selection};
pub use name::{CompSetName, sanitize_key};
pub use property::{BasicInfo, ComparablesData, DatasetSummary, PropertyRecord, UnitDetail};
pub use stats::CompSetStats;
