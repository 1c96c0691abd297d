//! Integration tests for comp set lifecycle operations.

use std::fs;
use std::path::Path;

use comps_core::{CompSetService, CompsError, ErrorKind, UpdateCompSet, UpdateOutcome};
use comps_model::{CompSetProperty, ModelError, PropertyRecord};
use tempfile::{TempDir, tempdir};

const DATASET: &str = r#"{
    "comparable_properties": [
        {
            "property_name": "Oakwood",
            "full_address": "100 Oak St",
            "basic_info": {"property_type": "Multifamily", "total_units": 240, "year_built": 1998},
            "notes": "Occupancy: 95%",
            "source_document": "OM_Oakwood.pdf"
        },
        {
            "property_name": "Birchview",
            "full_address": "2 Birch Ave",
            "basic_info": {"property_type": "Multifamily", "total_units": 120},
            "source_document": "OM_Birchview.pdf"
        }
    ],
    "summary": {"total_properties": 2, "documents_processed": ["OM_Oakwood.pdf", "OM_Birchview.pdf"]}
}"#;

fn service(dir: &TempDir) -> CompSetService {
    CompSetService::open(
        dir.path().join("comp_sets"),
        dir.path().join("output").join("comparables_data.json"),
    )
    .unwrap()
}

fn write_dataset(dir: &TempDir, contents: &str) {
    let path = dir.path().join("output");
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("comparables_data.json"), contents).unwrap();
}

fn selected(name: &str) -> CompSetProperty {
    CompSetProperty::from(PropertyRecord::new(name, "Multifamily"))
}

fn ids(service: &CompSetService, name: &str) -> Vec<String> {
    service
        .get(name)
        .unwrap()
        .properties
        .into_iter()
        .filter_map(|property| property.id)
        .collect()
}

fn file_count(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn save_creates_then_merges_first_wins() {
    let dir = tempdir().unwrap();
    let service = service(&dir);

    let created = service.save("Q1", vec![selected("Oakwood")]).unwrap();
    assert_eq!(created.properties.len(), 1);

    let mut changed = selected("Oakwood");
    changed.record.address = "somewhere else".to_string();
    let merged = service
        .save("Q1", vec![changed, selected("Birchview")])
        .unwrap();

    assert_eq!(merged.properties.len(), 2);
    assert_eq!(merged.properties[0].record.address, "");
    assert_eq!(ids(&service, "Q1"), vec!["Oakwood", "Birchview"]);
}

#[test]
fn save_rejects_bad_input() {
    let dir = tempdir().unwrap();
    let service = service(&dir);

    let error = service.save("   ", vec![selected("Oakwood")]).unwrap_err();
    assert!(matches!(error, CompsError::Invalid(ModelError::EmptyCompSetName)));
    assert_eq!(error.kind(), ErrorKind::Validation);

    let error = service.save("Q1", Vec::new()).unwrap_err();
    assert!(matches!(error, CompsError::Invalid(ModelError::NoProperties)));

    let error = service
        .save("Q1", vec![CompSetProperty::default()])
        .unwrap_err();
    assert!(matches!(
        error,
        CompsError::Invalid(ModelError::MissingIdentity { index: 0 })
    ));

    assert!(service.list().unwrap().is_empty());
}

#[test]
fn save_into_legacy_file_with_duplicates() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    fs::write(
        dir.path().join("comp_sets").join("Q1.json"),
        r#"[{"property_name": "Oakwood"}, {"property_name": "Oakwood"}]"#,
    )
    .unwrap();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .finish();
    let saved = tracing::subscriber::with_default(subscriber, || {
        service.save("Q1", vec![selected("Oakwood"), selected("Birchview")])
    })
    .unwrap();

    assert_eq!(saved.properties.len(), 2);
    assert_eq!(ids(&service, "Q1"), vec!["Oakwood", "Birchview"]);
}

#[test]
fn get_enriches_from_canonical_dataset() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    write_dataset(&dir, DATASET);
    service
        .save("Q1", vec![selected("Oakwood"), selected("Gone")])
        .unwrap();

    let view = service.get("Q1").unwrap();

    assert_eq!(view.properties.len(), 2);
    let oakwood = &view.properties[0];
    assert!(!oakwood.data_not_found);
    assert_eq!(oakwood.record.address, "100 Oak St");
    assert_eq!(oakwood.record.basic_info.total_units, Some(240));
    assert!(view.properties[1].data_not_found);

    assert_eq!(view.summary.unwrap().total_properties, 2);
    assert_eq!(view.stats.properties_with_full_data, 1);
    assert_eq!(view.stats.properties_with_missing_data, 1);
    assert_eq!(view.stats.avg_occupancy, Some(95.0));
}

#[test]
fn get_degrades_without_dataset() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service
        .save("Q1", vec![selected("Oakwood"), selected("Birchview")])
        .unwrap();

    let view = service.get("Q1").unwrap();
    assert!(view.summary.is_none());
    assert!(view.properties.iter().all(|p| p.data_not_found));
    assert_eq!(view.properties[0].id.as_deref(), Some("Oakwood"));
}

#[test]
fn get_degrades_with_corrupt_dataset() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    write_dataset(&dir, "{ this is not json");
    service.save("Q1", vec![selected("Oakwood")]).unwrap();

    let view = service.get("Q1").unwrap();
    assert!(view.properties[0].data_not_found);
}

#[test]
fn get_missing_comp_set_is_not_found() {
    let dir = tempdir().unwrap();
    let error = service(&dir).get("nope").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn rename_moves_contents() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service.save("Q1", vec![selected("Oakwood")]).unwrap();

    service.rename("Q1", "Q1-Final", None).unwrap();

    let names: Vec<String> = service.list().unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Q1-Final".to_string()]);
    assert_eq!(ids(&service, "Q1-Final"), vec!["Oakwood"]);
}

#[test]
fn rename_onto_existing_leaves_both_untouched() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service.save("Q1", vec![selected("Oakwood")]).unwrap();
    service.save("Q2", vec![selected("Birchview")]).unwrap();

    let error = service.rename("Q1", "Q2", None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Conflict);
    assert_eq!(ids(&service, "Q1"), vec!["Oakwood"]);
    assert_eq!(ids(&service, "Q2"), vec!["Birchview"]);
}

#[test]
fn rename_missing_source_is_not_found() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    let error = service.rename("Q1", "Q2", None).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn rename_within_same_key_updates_display_name() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service.save("Q1 Final", vec![selected("Oakwood")]).unwrap();

    service.rename("Q1 Final", "Q1_Final", None).unwrap();

    let items = service.list().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Q1_Final");
    assert_eq!(file_count(service.store().dir()), 1);
}

#[test]
fn update_renames_with_new_contents() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service.save("Q1", vec![selected("Oakwood")]).unwrap();

    let outcome = service
        .update(
            "Q1",
            UpdateCompSet {
                new_name: Some("Q2".to_string()),
                properties: Some(vec![selected("Birchview"), selected("Birchview")]),
            },
        )
        .unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Renamed {
            old_name: "Q1".to_string(),
            new_name: "Q2".to_string(),
        }
    );
    assert_eq!(ids(&service, "Q2"), vec!["Birchview"]);
}

#[test]
fn update_with_same_name_replaces_contents() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service
        .save("Q1", vec![selected("Oakwood"), selected("Birchview")])
        .unwrap();

    let outcome = service
        .update(
            "Q1",
            UpdateCompSet {
                new_name: Some("Q1".to_string()),
                properties: Some(vec![selected("Birchview")]),
            },
        )
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Replaced { property_count: 1 });
    assert_eq!(ids(&service, "Q1"), vec!["Birchview"]);
}

#[test]
fn update_requires_a_change_and_an_existing_set() {
    let dir = tempdir().unwrap();
    let service = service(&dir);

    let error = service.update("Q1", UpdateCompSet::default()).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    service.save("Q1", vec![selected("Oakwood")]).unwrap();
    let error = service.update("Q1", UpdateCompSet::default()).unwrap_err();
    assert!(matches!(error, CompsError::EmptyUpdate));
}

#[test]
fn replace_allows_emptying_a_set() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service.save("Q1", vec![selected("Oakwood")]).unwrap();

    assert_eq!(service.replace("Q1", Vec::new()).unwrap(), 0);
    assert_eq!(service.list().unwrap()[0].property_count, 0);
}

#[test]
fn remove_property_drops_matching_entry() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service
        .save("Q1", vec![selected("Oakwood"), selected("Birchview")])
        .unwrap();

    assert_eq!(service.remove_property("Q1", "Oakwood").unwrap(), 1);
    assert_eq!(ids(&service, "Q1"), vec!["Birchview"]);
}

#[test]
fn remove_unknown_property_keeps_set_intact() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service
        .save("Q1", vec![selected("Oakwood"), selected("Birchview")])
        .unwrap();

    let error = service.remove_property("Q1", "Maple").unwrap_err();

    assert!(matches!(error, CompsError::PropertyNotFound { .. }));
    assert_eq!(service.list().unwrap()[0].property_count, 2);
}

#[test]
fn delete_removes_the_set() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service.save("Q1", vec![selected("Oakwood")]).unwrap();

    service.delete("Q1").unwrap();
    assert!(service.list().unwrap().is_empty());

    let error = service.delete("Q1").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn comparables_requires_dataset() {
    let dir = tempdir().unwrap();
    let service = service(&dir);

    let error = service.comparables().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UpstreamUnavailable);

    write_dataset(&dir, DATASET);
    let data = service.comparables().unwrap();
    assert_eq!(data.comparable_properties.len(), 2);
}

#[test]
fn analyst_workflow_end_to_end() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    write_dataset(&dir, DATASET);

    service.save("SA-Downtown", vec![selected("Oakwood")]).unwrap();
    service
        .save("SA-Downtown", vec![selected("Oakwood"), selected("Birchview")])
        .unwrap();
    assert_eq!(ids(&service, "SA-Downtown"), vec!["Oakwood", "Birchview"]);

    service.rename("SA-Downtown", "SA-Final", None).unwrap();
    service.remove_property("SA-Final", "Oakwood").unwrap();

    let view = service.get("SA-Final").unwrap();
    assert_eq!(view.name, "SA-Final");
    assert_eq!(view.properties.len(), 1);
    assert_eq!(view.properties[0].record.address, "2 Birch Ave");
    assert_eq!(service.list().unwrap().len(), 1);
}
