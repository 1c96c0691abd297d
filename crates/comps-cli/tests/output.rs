//! Terminal table rendering against a real store.

use std::fs;

use comps_cli::output::{comp_set_table, list_table, stats_table};
use comps_core::CompSetService;
use comps_model::{CompSetProperty, PropertyRecord};
use tempfile::{TempDir, tempdir};

const DATASET: &str = r#"{
    "comparable_properties": [
        {
            "property_name": "Oakwood",
            "full_address": "100 Oak St",
            "basic_info": {"property_type": "Multifamily", "total_units": 240, "year_built": 1998},
            "notes": "Occupancy: 95%",
            "source_document": "OM_Oakwood.pdf"
        }
    ]
}"#;

fn service(dir: &TempDir) -> CompSetService {
    let output = dir.path().join("output");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("comparables_data.json"), DATASET).unwrap();
    CompSetService::open(
        dir.path().join("comp_sets"),
        output.join("comparables_data.json"),
    )
    .unwrap()
}

fn selected(name: &str) -> CompSetProperty {
    CompSetProperty::from(PropertyRecord::new(name, "Multifamily"))
}

#[test]
fn list_table_shows_every_comp_set() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service
        .save("Downtown", vec![selected("Oakwood"), selected("Elm")])
        .unwrap();
    service.save("Suburbs", vec![selected("Oakwood")]).unwrap();

    let mut table = list_table(&service.list().unwrap());
    table.force_no_tty();
    let rendered = table.to_string();

    assert!(rendered.contains("Downtown"), "{rendered}");
    assert!(rendered.contains("Suburbs"), "{rendered}");
    assert!(rendered.contains("Comp Set"), "{rendered}");
}

#[test]
fn comp_set_table_marks_properties_without_data() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service
        .save("Downtown", vec![selected("Oakwood"), selected("Elm")])
        .unwrap();

    let view = service.get("Downtown").unwrap();
    let mut table = comp_set_table(&view);
    table.force_no_tty();
    let rendered = table.to_string();

    assert!(rendered.contains("Oakwood"), "{rendered}");
    assert!(rendered.contains("100 Oak St"), "{rendered}");
    assert!(rendered.contains("95%"), "{rendered}");
    assert!(rendered.contains("Elm (no data)"), "{rendered}");
}

#[test]
fn stats_table_reports_counts() {
    let dir = tempdir().unwrap();
    let service = service(&dir);
    service
        .save("Downtown", vec![selected("Oakwood"), selected("Elm")])
        .unwrap();

    let view = service.get("Downtown").unwrap();
    let mut table = stats_table(&view.stats);
    table.force_no_tty();
    let rendered = table.to_string();

    assert!(rendered.contains("Missing data"), "{rendered}");
    assert!(rendered.contains("240"), "{rendered}");
}
