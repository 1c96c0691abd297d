use serde::{Deserialize, Serialize};

use crate::comp_set::CompSetProperty;
use crate::notes;

/// Headline numbers for a comp set view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompSetStats {
    pub total_properties: usize,
    pub properties_with_full_data: usize,
    pub properties_with_missing_data: usize,
    pub total_units: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_occupancy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rent_per_sf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_year_built: Option<i32>,
}

impl CompSetStats {
    pub fn compute(properties: &[CompSetProperty]) -> Self {
        let missing = properties
            .iter()
            .filter(|property| property.data_not_found)
            .count();
        let total_units = properties
            .iter()
            .filter_map(|property| property.record.basic_info.total_units)
            .map(u64::from)
            .sum();
        let occupancies: Vec<f64> = properties
            .iter()
            .filter_map(|property| notes::occupancy(&property.record))
            .collect();
        let rents: Vec<f64> = properties
            .iter()
            .filter_map(|property| notes::rent_per_sf(&property.record))
            .collect();
        let years: Vec<f64> = properties
            .iter()
            .filter_map(|property| property.record.basic_info.year_built)
            .map(f64::from)
            .collect();

        Self {
            total_properties: properties.len(),
            properties_with_full_data: properties.len() - missing,
            properties_with_missing_data: missing,
            total_units,
            avg_occupancy: mean(&occupancies),
            avg_rent_per_sf: mean(&rents),
            avg_year_built: mean(&years).map(|year| year.round() as i32),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyRecord;

    fn property(name: &str, units: Option<u32>, year: Option<i32>, notes: &str) -> CompSetProperty {
        let mut record = PropertyRecord::new(name, "Multifamily");
        record.basic_info.total_units = units;
        record.basic_info.year_built = year;
        if !notes.is_empty() {
            record.notes = Some(notes.to_string());
        }
        CompSetProperty::stamped(record)
    }

    #[test]
    fn empty_set_has_no_averages() {
        let stats = CompSetStats::compute(&[]);
        assert_eq!(stats.total_properties, 0);
        assert_eq!(stats.avg_occupancy, None);
        assert_eq!(stats.avg_year_built, None);
    }

    #[test]
    fn averages_skip_unknown_values() {
        let mut missing = property("Elm", None, None, "");
        missing.data_not_found = true;
        let properties = vec![
            property("Oakwood", Some(120), Some(1999), "Occupancy: 90%. Avg. Rent/SF: $2.00"),
            property("Birchview", Some(80), Some(2010), "Occupancy: 96% Avg Rent/SF: $2.50"),
            missing,
        ];
        let stats = CompSetStats::compute(&properties);
        assert_eq!(stats.total_properties, 3);
        assert_eq!(stats.properties_with_full_data, 2);
        assert_eq!(stats.properties_with_missing_data, 1);
        assert_eq!(stats.total_units, 200);
        assert_eq!(stats.avg_occupancy, Some(93.0));
        assert_eq!(stats.avg_rent_per_sf, Some(2.25));
        assert_eq!(stats.avg_year_built, Some(2005));
    }
}
