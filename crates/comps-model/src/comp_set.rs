use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::identify;
use crate::property::PropertyRecord;

/// A property as held in a comp set: the record plus its identity stamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompSetProperty {
    #[serde(
        rename = "property_id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Set when enrichment found no canonical record for this entry.
    #[serde(
        rename = "dataNotFound",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub data_not_found: bool,
    #[serde(flatten)]
    pub record: PropertyRecord,
}

impl CompSetProperty {
    /// Entry for `record` stamped with the identity it resolves to.
    pub fn stamped(record: PropertyRecord) -> Self {
        let mut property = Self::from(record);
        property.stamp();
        property
    }

    /// Fix the identity in place (`id`, else `name`).
    pub fn stamp(&mut self) {
        let id = identify(self).to_string();
        self.id = Some(id);
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }
}

impl From<PropertyRecord> for CompSetProperty {
    fn from(record: PropertyRecord) -> Self {
        Self {
            id: None,
            data_not_found: false,
            record,
        }
    }
}

/// A named, persisted comp set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompSet {
    pub name: String,
    pub properties: Vec<CompSetProperty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CompSet {
    pub fn contains(&self, id: &str) -> bool {
        self.properties.iter().any(|property| identify(property) == id)
    }
}

/// Listing projection of a comp set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompSetListItem {
    pub name: String,
    pub property_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&CompSet> for CompSetListItem {
    fn from(comp_set: &CompSet) -> Self {
        Self {
            name: comp_set.name.clone(),
            property_count: comp_set.properties.len(),
            created_at: comp_set.created_at,
            updated_at: comp_set.updated_at,
        }
    }
}
