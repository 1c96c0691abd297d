//! Comp set lifecycle: create/merge, replace, rename, delete, remove one
//! property, list and the enriched read.
//!
//! Every read-modify-write runs under the store's per-name lock. Rename is
//! still two file operations (write the new name, remove the old one); a
//! crash in between leaves both files, and both are listed afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use comps_model::{
    CompSet, CompSetListItem, CompSetName, CompSetProperty, CompSetStats, ComparablesData,
    DatasetSummary, identify, merge, validate_selection,
};
use comps_store::{CompSetStore, load_comparables};

use crate::enrich::{enrich, mark_all_missing};
use crate::error::{CompsError, Result};

/// A comp set as shown to the user: enriched entries plus headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompSetView {
    pub name: String,
    pub properties: Vec<CompSetProperty>,
    /// Summary of the canonical dataset, present when enrichment succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<DatasetSummary>,
    pub stats: CompSetStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of an update: rename, replace contents, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<CompSetProperty>>,
}

/// What an update ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Renamed { old_name: String, new_name: String },
    Replaced { property_count: usize },
}

/// Lifecycle operations over a [`CompSetStore`] and the canonical dataset.
#[derive(Debug)]
pub struct CompSetService {
    store: CompSetStore,
    comparables_path: PathBuf,
}

impl CompSetService {
    pub fn new(store: CompSetStore, comparables_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            comparables_path: comparables_path.into(),
        }
    }

    /// Open the store at `comp_sets_dir`, creating the directory if needed.
    pub fn open(
        comp_sets_dir: impl Into<PathBuf>,
        comparables_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let store = CompSetStore::open(comp_sets_dir)?;
        Ok(Self::new(store, comparables_path))
    }

    pub fn store(&self) -> &CompSetStore {
        &self.store
    }

    pub fn comparables_path(&self) -> &Path {
        &self.comparables_path
    }

    /// Summaries of every comp set; empty when none exist.
    pub fn list(&self) -> Result<Vec<CompSetListItem>> {
        Ok(self.store.list()?)
    }

    /// Load `name` and join it against the canonical dataset.
    ///
    /// A missing or unreadable canonical dataset does not fail the read: the
    /// stored entries come back flagged `data_not_found` instead.
    pub fn get(&self, name: &str) -> Result<CompSetView> {
        let name = CompSetName::new(name)?;
        let comp_set = self
            .store
            .with_locked(&[&name], || self.store.load(&name))?
            .ok_or_else(|| not_found(&name))?;

        let (properties, summary) = match load_comparables(&self.comparables_path) {
            Ok(Some(data)) => {
                let joined = enrich(&comp_set.properties, &data.comparable_properties);
                (joined, data.summary)
            }
            Ok(None) => {
                tracing::warn!(
                    comp_set = %name,
                    "comparables data not found at {}, returning comp set unenriched",
                    self.comparables_path.display()
                );
                (mark_all_missing(&comp_set.properties), None)
            }
            Err(error) => {
                tracing::warn!(
                    comp_set = %name,
                    %error,
                    "enrichment failed, returning comp set unenriched"
                );
                (mark_all_missing(&comp_set.properties), None)
            }
        };

        let stats = CompSetStats::compute(&properties);
        Ok(CompSetView {
            name: comp_set.name,
            properties,
            summary,
            stats,
            created_at: comp_set.created_at,
            updated_at: comp_set.updated_at,
        })
    }

    /// Create `name` from `properties`, or merge them into the existing set.
    ///
    /// Entries already in the set keep their stored fields; incoming
    /// duplicates only count toward presence.
    pub fn save(&self, name: &str, properties: Vec<CompSetProperty>) -> Result<CompSet> {
        let name = CompSetName::new(name)?;
        validate_selection(&properties)?;

        self.store.with_locked(&[&name], || {
            let existing = self.store.load(&name)?;
            let created = existing.is_none();
            let current = existing.map(|comp_set| comp_set.properties).unwrap_or_default();
            // Legacy files may hold duplicates that merge folds away.
            let before = current.iter().map(identify).collect::<HashSet<_>>().len();
            let merged = merge(current, properties);
            self.store.write(&name, &merged)?;
            tracing::info!(
                comp_set = %name,
                created,
                added = merged.len().saturating_sub(before),
                total = merged.len(),
                "saved comp set"
            );
            Ok(CompSet {
                name: name.as_str().to_string(),
                properties: merged,
                created_at: None,
                updated_at: None,
            })
        })
    }

    /// Overwrite the contents of an existing set (deduplicated).
    pub fn replace(&self, name: &str, properties: Vec<CompSetProperty>) -> Result<usize> {
        let name = CompSetName::new(name)?;
        self.store.with_locked(&[&name], || {
            if !self.store.exists(&name) {
                return Err(not_found(&name));
            }
            let properties = merge(Vec::new(), properties);
            self.store.write(&name, &properties)?;
            Ok(properties.len())
        })
    }

    /// Move `name` to `new_name`, optionally replacing its contents.
    ///
    /// Fails with not-found when the source is absent and with a conflict
    /// when the destination exists; in both cases nothing is written. A new
    /// name with the same storage key only updates the display name.
    pub fn rename(
        &self,
        name: &str,
        new_name: &str,
        properties: Option<Vec<CompSetProperty>>,
    ) -> Result<()> {
        let old = CompSetName::new(name)?;
        let new = CompSetName::new(new_name)?;

        self.store.with_locked(&[&old, &new], || {
            let current = self.store.load(&old)?.ok_or_else(|| not_found(&old))?;
            let contents = match properties {
                Some(properties) => merge(Vec::new(), properties),
                None => current.properties,
            };

            if old.same_key(&new) {
                self.store.write(&new, &contents)?;
                tracing::info!(from = %old, to = %new, "renamed comp set in place");
                return Ok(());
            }
            if self.store.exists(&new) {
                return Err(CompsError::AlreadyExists {
                    name: new.as_str().to_string(),
                });
            }

            self.store.write(&new, &contents)?;
            self.store.remove(&old)?;
            tracing::info!(from = %old, to = %new, "renamed comp set");
            Ok(())
        })
    }

    /// Apply an update request: rename when `new_name` differs from `name`,
    /// otherwise replace contents when `properties` is given.
    pub fn update(&self, name: &str, update: UpdateCompSet) -> Result<UpdateOutcome> {
        let current = CompSetName::new(name)?;
        if !self.store.exists(&current) {
            return Err(not_found(&current));
        }

        match update.new_name {
            Some(new_name) if new_name.trim() != current.as_str() => {
                self.rename(name, &new_name, update.properties)?;
                Ok(UpdateOutcome::Renamed {
                    old_name: current.as_str().to_string(),
                    new_name: new_name.trim().to_string(),
                })
            }
            _ => match update.properties {
                Some(properties) => {
                    let property_count = self.replace(name, properties)?;
                    Ok(UpdateOutcome::Replaced { property_count })
                }
                None => Err(CompsError::EmptyUpdate),
            },
        }
    }

    /// Remove a comp set entirely.
    pub fn delete(&self, name: &str) -> Result<()> {
        let name = CompSetName::new(name)?;
        self.store.with_locked(&[&name], || {
            if self.store.remove(&name)? {
                Ok(())
            } else {
                Err(not_found(&name))
            }
        })
    }

    /// Drop every entry whose identity is `property_id`.
    ///
    /// Returns the number of entries left in the set.
    pub fn remove_property(&self, name: &str, property_id: &str) -> Result<usize> {
        let name = CompSetName::new(name)?;
        self.store.with_locked(&[&name], || {
            let comp_set = self.store.load(&name)?.ok_or_else(|| not_found(&name))?;
            let before = comp_set.properties.len();
            let remaining: Vec<CompSetProperty> = comp_set
                .properties
                .into_iter()
                .filter(|property| identify(property) != property_id)
                .collect();
            if remaining.len() == before {
                return Err(CompsError::PropertyNotFound {
                    name: name.as_str().to_string(),
                    property_id: property_id.to_string(),
                });
            }
            self.store.write(&name, &remaining)?;
            tracing::info!(
                comp_set = %name,
                property_id,
                remaining = remaining.len(),
                "removed property"
            );
            Ok(remaining.len())
        })
    }

    /// The canonical dataset as stored.
    pub fn comparables(&self) -> Result<ComparablesData> {
        load_comparables(&self.comparables_path)?.ok_or_else(|| CompsError::DatasetUnavailable {
            path: self.comparables_path.clone(),
        })
    }
}

fn not_found(name: &CompSetName) -> CompsError {
    CompsError::CompSetNotFound {
        name: name.as_str().to_string(),
    }
}
