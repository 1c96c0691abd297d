//! CSV renderings of property records.
//!
//! Values are written raw (no grouping, no `%`); unknown values are empty
//! cells.

use csv::Writer;

use comps_model::{PropertyRecord, notes};

use crate::error::{ExportError, Result};

pub const PROPERTY_HEADERS: [&str; 11] = [
    "Property Name",
    "Address",
    "Property Type",
    "Total Units",
    "Total SF",
    "Year Built",
    "Year Renovated",
    "Occupancy %",
    "Distance",
    "Notes",
    "Source",
];

pub const UNIT_HEADERS: [&str; 4] = ["Property Name", "Unit Type", "Square Feet", "Rent"];

/// One row per property.
pub fn properties_csv<'a>(
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(PROPERTY_HEADERS)?;
    for record in records {
        let info = &record.basic_info;
        writer.write_record([
            record.name.clone(),
            record.address.clone(),
            info.property_type.clone(),
            cell(info.total_units),
            cell(info.total_square_feet),
            cell(info.year_built),
            cell(info.year_renovated),
            cell(info.occupancy_rate),
            notes::distance(record).unwrap_or_default(),
            record.notes.clone().unwrap_or_default(),
            record.source_document.clone(),
        ])?;
    }
    finish(writer)
}

/// One row per unit-mix line across all properties.
///
/// Fails with [`ExportError::NoUnits`] when no property carries unit details.
pub fn units_csv<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(UNIT_HEADERS)?;
    let mut rows = 0usize;
    for record in records {
        for unit in &record.unit_details {
            writer.write_record([
                record.name.clone(),
                unit.unit_type.clone(),
                cell(unit.square_feet),
                unit.rent.clone().unwrap_or_default(),
            ])?;
            rows += 1;
        }
    }
    if rows == 0 {
        return Err(ExportError::NoUnits);
    }
    finish(writer)
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|error| error.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use comps_model::UnitDetail;

    #[test]
    fn unknowns_are_empty_cells() {
        let record = PropertyRecord::new("Oakwood", "Multifamily");
        let bytes = properties_csv([&record]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row, "Oakwood,,Multifamily,,,,,,,,");
    }

    #[test]
    fn units_without_any_details_is_an_error() {
        let record = PropertyRecord::new("Oakwood", "Multifamily");
        assert!(matches!(units_csv([&record]), Err(ExportError::NoUnits)));
    }

    #[test]
    fn units_rows_follow_property_order() {
        let mut first = PropertyRecord::new("Oakwood", "Multifamily");
        first.unit_details = vec![UnitDetail {
            unit_type: "1BR".to_string(),
            square_feet: Some(700),
            rent: Some("$1,500/month".to_string()),
        }];
        let mut second = PropertyRecord::new("Birchview", "Multifamily");
        second.unit_details = vec![UnitDetail {
            unit_type: "Studio".to_string(),
            ..UnitDetail::default()
        }];

        let text = String::from_utf8(units_csv([&first, &second]).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Property Name,Unit Type,Square Feet,Rent");
        assert_eq!(lines[1], "Oakwood,1BR,700,\"$1,500/month\"");
        assert_eq!(lines[2], "Birchview,Studio,,");
    }
}
