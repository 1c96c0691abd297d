//! CSV and XLSX exports of comparable properties.
//!
//! Everything here renders to an in-memory buffer; callers decide whether
//! the bytes go to an HTTP response or a file.

pub mod error;
pub mod format;
pub mod table;
pub mod workbook;

pub use error::{ExportError, Result};
pub use format::{
    comp_set_csv_filename, comp_set_units_csv_filename, comp_set_workbook_filename,
    dataset_csv_filename, dataset_workbook_filename, units_csv_filename,
};
pub use table::{PROPERTY_HEADERS, UNIT_HEADERS, properties_csv, units_csv};
pub use workbook::{Cell, comp_set_workbook, dataset_workbook};

/// Message returned whenever an export is asked for before any extraction
/// has produced the canonical dataset.
pub const MISSING_DATASET_MESSAGE: &str =
    "No comparables data found. Please run an extraction recipe first.";

/// Today's date (UTC) as used in export filenames and info sheets.
pub fn export_date() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
