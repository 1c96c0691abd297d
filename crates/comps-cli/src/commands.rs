//! Command implementations for the `comps` binary.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comps_core::CompSetService;
use chrono::NaiveDate;
use comps_export::{
    MISSING_DATASET_MESSAGE, comp_set_csv_filename, comp_set_units_csv_filename,
    comp_set_workbook, comp_set_workbook_filename, dataset_csv_filename, dataset_workbook,
    dataset_workbook_filename, export_date, properties_csv, units_csv, units_csv_filename,
};
use comps_server::{ApiConfig, run_server};
use comps_store::paths::{default_comp_sets_dir, default_comparables_path};

use crate::cli::{ExportArgs, ExportKind, ServeArgs, StorageArgs};
use comps_cli::output::{comp_set_table, list_table, stats_table};

/// Resolved storage locations.
pub struct Storage {
    pub comp_sets_dir: PathBuf,
    pub comparables_path: PathBuf,
}

impl Storage {
    pub fn from_args(args: &StorageArgs) -> Self {
        Self {
            comp_sets_dir: args
                .comp_sets_dir
                .clone()
                .unwrap_or_else(default_comp_sets_dir),
            comparables_path: args
                .data_file
                .clone()
                .unwrap_or_else(default_comparables_path),
        }
    }

    fn open(&self) -> Result<CompSetService> {
        CompSetService::open(&self.comp_sets_dir, &self.comparables_path).with_context(|| {
            format!(
                "open comp sets directory {}",
                self.comp_sets_dir.display()
            )
        })
    }
}

pub fn run_serve(storage: Storage, args: &ServeArgs) -> Result<()> {
    let config = ApiConfig {
        host: args.host.clone(),
        port: args.port,
        enable_cors: !args.no_cors,
        comp_sets_dir: storage.comp_sets_dir,
        comparables_path: storage.comparables_path,
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime.block_on(run_server(config))?;
    Ok(())
}

pub fn run_list(storage: &Storage) -> Result<()> {
    let service = storage.open()?;
    let items = service.list()?;
    if items.is_empty() {
        println!("No comp sets in {}", storage.comp_sets_dir.display());
        return Ok(());
    }
    println!("{}", list_table(&items));
    Ok(())
}

pub fn run_show(storage: &Storage, name: &str) -> Result<()> {
    let service = storage.open()?;
    let view = service.get(name)?;
    println!("{}", view.name);
    println!("{}", comp_set_table(&view));
    println!("{}", stats_table(&view.stats));
    Ok(())
}

pub fn run_migrate(storage: &Storage) -> Result<()> {
    let service = storage.open()?;
    let migrated = service.store().migrate_legacy()?;
    if migrated.is_empty() {
        println!("All comp sets already use the current format");
    } else {
        for name in &migrated {
            println!("migrated {name}");
        }
        tracing::info!(count = migrated.len(), "migrated legacy comp sets");
    }
    Ok(())
}

/// Render the requested export and write it; returns the written path.
pub fn run_export(storage: &Storage, args: &ExportArgs) -> Result<PathBuf> {
    let service = storage.open()?;
    let date = export_date();

    let bytes = match &args.comp_set {
        Some(name) => {
            let view = service.get(name)?;
            let records = view.properties.iter().map(|property| &property.record);
            match args.kind {
                ExportKind::Csv => properties_csv(records)?,
                ExportKind::UnitsCsv => units_csv(records)?,
                ExportKind::Xlsx => comp_set_workbook(&view.name, records, date)?,
            }
        }
        None => {
            if !storage.comparables_path.exists() {
                bail!(MISSING_DATASET_MESSAGE);
            }
            let data = service.comparables()?;
            match args.kind {
                ExportKind::Csv => properties_csv(&data.comparable_properties)?,
                ExportKind::UnitsCsv => units_csv(&data.comparable_properties)?,
                ExportKind::Xlsx => dataset_workbook(&data, date)?,
            }
        }
    };

    let filename = export_filename(args.comp_set.as_deref(), args.kind, date);
    let path = args.output.clone().unwrap_or_else(|| PathBuf::from(filename));
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}

/// Default output name; comp set exports never reuse a dataset filename.
fn export_filename(comp_set: Option<&str>, kind: ExportKind, date: NaiveDate) -> String {
    match (comp_set, kind) {
        (Some(name), ExportKind::Csv) => comp_set_csv_filename(name, date),
        (Some(name), ExportKind::UnitsCsv) => comp_set_units_csv_filename(name, date),
        (Some(name), ExportKind::Xlsx) => comp_set_workbook_filename(name, date),
        (None, ExportKind::Csv) => dataset_csv_filename(date),
        (None, ExportKind::UnitsCsv) => units_csv_filename(date),
        (None, ExportKind::Xlsx) => dataset_workbook_filename(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comp_set_exports_get_their_own_filenames() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        for kind in [ExportKind::Csv, ExportKind::UnitsCsv, ExportKind::Xlsx] {
            let dataset = export_filename(None, kind, date);
            let comp_set = export_filename(Some("Q1 Final"), kind, date);
            assert_ne!(dataset, comp_set);
            assert!(comp_set.starts_with("CompSet_Q1_Final_"), "{comp_set}");
        }
        assert_eq!(
            export_filename(Some("Q1"), ExportKind::Csv, date),
            "CompSet_Q1_2026-03-09.csv"
        );
    }
}
