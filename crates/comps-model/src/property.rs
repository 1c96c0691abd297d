//! Comparable property records as produced by the extraction pipeline.
//!
//! Field names on the wire follow the extraction schema (`property_name`,
//! `full_address`, `basic_info`, ...). Unknown numeric facts are `None` and
//! are omitted on output; they are never coerced to zero.

use serde::{Deserialize, Deserializer, Serialize};

/// Core facts about a property. `property_type` is the only required field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub property_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_units: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_square_feet: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_renovated: Option<i32>,
    /// Percentage in `0..=100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupancy_rate: Option<f64>,
}

/// One row of a property's unit mix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitDetail {
    pub unit_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,
    /// Display string as found in the source ("$1,500/month", "$25/sf/year").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<String>,
}

/// A comparable property extracted from an offering document.
///
/// Everything except the name defaults when absent so that partial
/// references stored in older comp sets still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    #[serde(rename = "property_name", alias = "name", default)]
    pub name: String,
    #[serde(rename = "full_address", alias = "address", default)]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basic_info: BasicInfo,
    #[serde(
        rename = "units_detail",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub unit_details: Vec<UnitDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_subject: Option<String>,
    #[serde(default)]
    pub source_document: String,
}

impl PropertyRecord {
    pub fn new(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            basic_info: BasicInfo {
                property_type: property_type.into(),
                ..BasicInfo::default()
            },
            ..Self::default()
        }
    }
}

/// Summary block of the canonical dataset document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    #[serde(default)]
    pub total_properties: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents_processed: Vec<String>,
}

/// The canonical dataset: every property extracted for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparablesData {
    #[serde(
        alias = "properties",
        default,
        deserialize_with = "null_as_default"
    )]
    pub comparable_properties: Vec<PropertyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<DatasetSummary>,
}

impl ComparablesData {
    /// Property count from the summary block, falling back to the record count.
    pub fn total_properties(&self) -> usize {
        match &self.summary {
            Some(summary) if summary.total_properties > 0 => summary.total_properties,
            _ => self.comparable_properties.len(),
        }
    }

    pub fn documents_processed(&self) -> &[String] {
        self.summary
            .as_ref()
            .map(|summary| summary.documents_processed.as_slice())
            .unwrap_or_default()
    }
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
