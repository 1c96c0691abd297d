//! Property identity and the comp-set merge rule.
//!
//! Every place that needs to know "which property is this" goes through
//! [`identify`]: merging, removal, enrichment lookups and listing. The rule
//! is `id` when present and non-empty, otherwise the property name. Names
//! are not unique by construction, so two different properties sharing a
//! name collapse to one entry.

use std::collections::HashSet;

use crate::comp_set::CompSetProperty;
use crate::error::{ModelError, Result};
use crate::property::PropertyRecord;

/// Anything that can resolve to a property identity.
pub trait Identify {
    /// Explicitly stored identifier, if any.
    fn stored_id(&self) -> Option<&str>;
    /// Human-assigned property name.
    fn property_name(&self) -> &str;
}

impl Identify for PropertyRecord {
    fn stored_id(&self) -> Option<&str> {
        None
    }

    fn property_name(&self) -> &str {
        &self.name
    }
}

impl Identify for CompSetProperty {
    fn stored_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn property_name(&self) -> &str {
        &self.record.name
    }
}

/// Resolve the identity of `item`: stored id, else name.
pub fn identify<T: Identify + ?Sized>(item: &T) -> &str {
    match item.stored_id() {
        Some(id) if !id.is_empty() => id,
        _ => item.property_name(),
    }
}

/// Merge `incoming` into `existing`.
///
/// Walks `existing` then `incoming` in order and keeps the first element
/// seen for each identity, stamped with that identity. Later duplicates are
/// dropped without touching the kept element's fields, so the result keeps
/// first-seen order and holds unique ids.
pub fn merge<I>(existing: Vec<CompSetProperty>, incoming: I) -> Vec<CompSetProperty>
where
    I: IntoIterator<Item = CompSetProperty>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len());
    for mut property in existing.into_iter().chain(incoming) {
        let id = identify(&property).to_string();
        if seen.insert(id.clone()) {
            property.id = Some(id);
            merged.push(property);
        }
    }
    merged
}

/// Reject a selection that is empty or carries an entry with no identity.
pub fn validate_selection(properties: &[CompSetProperty]) -> Result<()> {
    if properties.is_empty() {
        return Err(ModelError::NoProperties);
    }
    if let Some(index) = properties
        .iter()
        .position(|property| identify(property).trim().is_empty())
    {
        return Err(ModelError::MissingIdentity { index });
    }
    Ok(())
}
