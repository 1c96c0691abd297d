//! Property tests for the comp-set merge rule.

use std::collections::HashSet;

use comps_model::{CompSetProperty, PropertyRecord, identify, merge};
use proptest::prelude::*;

fn arb_property() -> impl Strategy<Value = CompSetProperty> {
    (
        proptest::option::of(prop::sample::select(vec!["p-1", "p-2", "p-3", ""])),
        prop::sample::select(vec!["Oakwood", "Birchview", "Elm Court", "Maple"]),
        0u32..500,
    )
        .prop_map(|(id, name, units)| {
            let mut record = PropertyRecord::new(name, "Multifamily");
            record.basic_info.total_units = Some(units);
            CompSetProperty {
                id: id.map(str::to_string),
                ..CompSetProperty::from(record)
            }
        })
}

fn arb_properties() -> impl Strategy<Value = Vec<CompSetProperty>> {
    prop::collection::vec(arb_property(), 0..12)
}

fn ids(properties: &[CompSetProperty]) -> Vec<String> {
    properties
        .iter()
        .map(|property| identify(property).to_string())
        .collect()
}

proptest! {
    #[test]
    fn merge_with_nothing_is_identity(raw in arb_properties()) {
        let set = merge(Vec::new(), raw);
        prop_assert_eq!(merge(set.clone(), Vec::new()), set);
    }

    #[test]
    fn merge_with_itself_is_identity(raw in arb_properties()) {
        let set = merge(Vec::new(), raw);
        prop_assert_eq!(merge(set.clone(), set.clone()), set);
    }

    #[test]
    fn merged_ids_are_unique_and_stamped(existing in arb_properties(), incoming in arb_properties()) {
        let merged = merge(existing, incoming);
        let mut seen = HashSet::new();
        for property in &merged {
            let id = property.id.clone().expect("merged entries carry an id");
            prop_assert_eq!(id.as_str(), identify(property));
            prop_assert!(seen.insert(id));
        }
    }

    #[test]
    fn first_occurrence_wins_and_order_is_kept(existing in arb_properties(), incoming in arb_properties()) {
        let all: Vec<CompSetProperty> = existing.iter().chain(incoming.iter()).cloned().collect();
        let merged = merge(existing, incoming);

        let mut expected_order = Vec::new();
        for id in ids(&all) {
            if !expected_order.contains(&id) {
                expected_order.push(id);
            }
        }
        prop_assert_eq!(ids(&merged), expected_order);

        for property in &merged {
            let first = all
                .iter()
                .find(|candidate| identify(*candidate) == identify(property))
                .expect("merged entry comes from the input");
            prop_assert_eq!(&first.record, &property.record);
        }
    }
}

#[test]
fn existing_entry_is_not_overwritten() {
    let mut kept = PropertyRecord::new("a", "Multifamily");
    kept.basic_info.total_units = Some(1);
    let mut newer = PropertyRecord::new("a", "Multifamily");
    newer.basic_info.total_units = Some(2);

    let existing = merge(Vec::new(), vec![CompSetProperty::from(kept)]);
    let merged = merge(existing, vec![CompSetProperty::from(newer)]);

    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].id.as_deref(), Some("a"));
    assert_eq!(merged[0].record.basic_info.total_units, Some(1));
}

#[test]
fn merge_keeps_submission_order() {
    let incoming = vec![
        CompSetProperty::from(PropertyRecord::new("B", "Office")),
        CompSetProperty::from(PropertyRecord::new("A", "Office")),
    ];
    let merged = merge(Vec::new(), incoming);
    assert_eq!(ids(&merged), vec!["B".to_string(), "A".to_string()]);
}

#[test]
fn same_name_distinct_properties_collide() {
    let mut first = PropertyRecord::new("Oakwood", "Multifamily");
    first.address = "1 Main St".to_string();
    let mut second = PropertyRecord::new("Oakwood", "Multifamily");
    second.address = "99 Side St".to_string();

    let merged = merge(
        Vec::new(),
        vec![CompSetProperty::from(first), CompSetProperty::from(second)],
    );
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].record.address, "1 Main St");
}
