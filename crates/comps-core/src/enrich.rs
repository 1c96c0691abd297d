//! Join stored comp set entries against the canonical dataset.

use std::collections::HashMap;

use comps_model::{CompSetProperty, PropertyRecord, identify};

/// Replace each stored entry with its canonical record when one exists.
///
/// The lookup is keyed by the canonical record's identity (its name) and
/// probed with the stored entry's identity. A hit yields the canonical
/// fields stamped with the stored identity; a miss yields the stored entry
/// unchanged and flagged `data_not_found`. When several canonical records
/// share a name the last one wins.
pub fn enrich(stored: &[CompSetProperty], canonical: &[PropertyRecord]) -> Vec<CompSetProperty> {
    let lookup: HashMap<&str, &PropertyRecord> = canonical
        .iter()
        .map(|record| (identify(record), record))
        .collect();

    stored
        .iter()
        .map(|property| match lookup.get(identify(property)) {
            Some(record) => {
                let id = [
                    property.id.as_deref(),
                    Some(property.name()),
                    Some(record.name.as_str()),
                ]
                .into_iter()
                .flatten()
                .find(|candidate| !candidate.is_empty())
                .map(str::to_string);
                CompSetProperty {
                    id,
                    data_not_found: false,
                    record: (*record).clone(),
                }
            }
            None => flag_missing(property),
        })
        .collect()
}

/// Every entry flagged `data_not_found`, for when no canonical data is usable.
pub fn mark_all_missing(stored: &[CompSetProperty]) -> Vec<CompSetProperty> {
    stored.iter().map(flag_missing).collect()
}

fn flag_missing(property: &CompSetProperty) -> CompSetProperty {
    CompSetProperty {
        data_not_found: true,
        ..property.clone()
    }
}
