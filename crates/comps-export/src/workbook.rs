//! XLSX workbooks for the canonical dataset and for a single comp set.
//!
//! Sheets are laid out as a bold header row followed by one row per item.
//! Counts and areas are rendered as en-US grouped text (`245,000`),
//! occupancy as `N%`, years as numbers.

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use comps_model::{ComparablesData, PropertyRecord, notes};

use crate::error::{ExportError, Result};
use crate::format::{iso_date, percent, thousands};

const PROPERTY_COLUMNS: [&str; 11] = [
    "Property Name",
    "Address",
    "Type",
    "Total Units",
    "Total SF",
    "Year Built",
    "Year Renovated",
    "Occupancy Rate",
    "Distance",
    "Notes",
    "Source Document",
];

const UNIT_COLUMNS: [&str; 4] = ["Property Name", "Unit Type", "Square Feet", "Rent"];

const KEY_VALUE_COLUMNS: [&str; 2] = ["Key", "Value"];

/// A single worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Empty, Self::text)
    }
}

/// Workbook for the whole canonical dataset: `Summary`, `Properties` and,
/// when any record has a unit mix, `Unit Details`.
pub fn dataset_workbook(data: &ComparablesData, export_date: NaiveDate) -> Result<Vec<u8>> {
    if data.comparable_properties.is_empty() {
        return Err(ExportError::NoProperties);
    }
    let records: Vec<&PropertyRecord> = data.comparable_properties.iter().collect();
    let summary = vec![
        key_value("Total Properties", Cell::Number(data.total_properties() as f64)),
        key_value(
            "Documents Processed",
            Cell::text(data.documents_processed().join(", ")),
        ),
        key_value("Export Date", Cell::Text(iso_date(export_date))),
    ];
    build("Summary", &summary, &records)
}

/// Workbook for one comp set: `Comp Set Info`, `Properties` and, when any
/// entry has a unit mix, `Unit Details`.
pub fn comp_set_workbook<'a>(
    comp_set_name: &str,
    records: impl IntoIterator<Item = &'a PropertyRecord>,
    export_date: NaiveDate,
) -> Result<Vec<u8>> {
    let records: Vec<&PropertyRecord> = records.into_iter().collect();
    if records.is_empty() {
        return Err(ExportError::NoProperties);
    }
    let info = vec![
        key_value("Comp Set Name", Cell::text(comp_set_name)),
        key_value("Total Properties", Cell::Number(records.len() as f64)),
        key_value("Export Date", Cell::Text(iso_date(export_date))),
    ];
    build("Comp Set Info", &info, &records)
}

fn build(title: &str, info: &[Vec<Cell>], records: &[&PropertyRecord]) -> Result<Vec<u8>> {
    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();

    write_sheet(workbook.add_worksheet(), title, &KEY_VALUE_COLUMNS, info, &header)?;

    let properties = property_rows(records);
    write_sheet(
        workbook.add_worksheet(),
        "Properties",
        &PROPERTY_COLUMNS,
        &properties,
        &header,
    )?;

    let units = unit_rows(records);
    if !units.is_empty() {
        write_sheet(
            workbook.add_worksheet(),
            "Unit Details",
            &UNIT_COLUMNS,
            &units,
            &header,
        )?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    name: &str,
    columns: &[&str],
    rows: &[Vec<Cell>],
    header: &Format,
) -> Result<()> {
    worksheet.set_name(name)?;
    for (col, title) in (0u16..).zip(columns) {
        worksheet.write_string_with_format(0, col, *title, header)?;
        worksheet.set_column_width(col, column_width(title))?;
    }
    for (row, cells) in (1u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Number(number) => {
                    worksheet.write_number(row, col, *number)?;
                }
                Cell::Empty => {}
            }
        }
    }
    Ok(())
}

fn column_width(title: &str) -> f64 {
    match title {
        "Address" | "Notes" => 40.0,
        "Property Name" | "Source Document" | "Value" => 28.0,
        _ => 14.0,
    }
}

fn key_value(key: &str, value: Cell) -> Vec<Cell> {
    vec![Cell::text(key), value]
}

/// Display rows for the `Properties` sheet.
pub fn property_rows(records: &[&PropertyRecord]) -> Vec<Vec<Cell>> {
    records
        .iter()
        .map(|record| {
            let info = &record.basic_info;
            vec![
                Cell::text(record.name.as_str()),
                Cell::text(record.address.as_str()),
                Cell::text(info.property_type.as_str()),
                info.total_units.map(|units| thousands(u64::from(units))).into(),
                info.total_square_feet.map(thousands).into(),
                year(info.year_built),
                year(info.year_renovated),
                info.occupancy_rate.map(percent).into(),
                notes::distance(record).into(),
                record.notes.clone().into(),
                Cell::text(record.source_document.as_str()),
            ]
        })
        .collect()
}

/// Display rows for the `Unit Details` sheet.
pub fn unit_rows(records: &[&PropertyRecord]) -> Vec<Vec<Cell>> {
    records
        .iter()
        .flat_map(|record| {
            record.unit_details.iter().map(|unit| {
                vec![
                    Cell::text(record.name.as_str()),
                    Cell::text(unit.unit_type.as_str()),
                    unit.square_feet.map(|sf| thousands(u64::from(sf))).into(),
                    unit.rent.clone().into(),
                ]
            })
        })
        .collect()
}

fn year(value: Option<i32>) -> Cell {
    value.map_or(Cell::Empty, |year| Cell::Number(f64::from(year)))
}
