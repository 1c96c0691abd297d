//! One JSON file per comp set.
//!
//! Files are named `{key}.json` where `key` is the sanitized comp set name
//! and hold the wrapper
//!
//! ```text
//! { "version": 1, "name": "<display name>", "properties": [ ... ] }
//! ```
//!
//! Older files holding a bare array of properties still load; their display
//! name is the file stem. Every write emits the wrapper.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use comps_model::{CompSet, CompSetListItem, CompSetName, CompSetProperty, merge};

use crate::error::{Result, StoreError};
use crate::locks::KeyedLocks;

/// Schema version of the comp set wrapper.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const FILE_EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct CompSetDocument {
    version: u32,
    name: String,
    properties: Vec<CompSetProperty>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredShape {
    Current(CompSetDocument),
    Legacy(Vec<CompSetProperty>),
}

/// A comp set file as found on disk.
#[derive(Debug)]
struct LoadedFile {
    comp_set: CompSet,
    legacy: bool,
}

/// Filesystem-backed comp set storage.
///
/// Reads and writes are plain whole-file operations. Callers that
/// read-modify-write wrap the cycle in [`CompSetStore::with_locked`].
#[derive(Debug)]
pub struct CompSetStore {
    dir: PathBuf,
    locks: KeyedLocks,
}

impl CompSetStore {
    /// Open (and create if needed) the store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::io("create directory", &dir, e))?;
        Ok(Self {
            dir,
            locks: KeyedLocks::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &CompSetName) -> PathBuf {
        self.dir.join(format!("{}.{FILE_EXTENSION}", name.key()))
    }

    pub fn exists(&self, name: &CompSetName) -> bool {
        self.path_for(name).is_file()
    }

    /// Run `f` while holding the per-name locks for every name given.
    pub fn with_locked<R>(&self, names: &[&CompSetName], f: impl FnOnce() -> R) -> R {
        let keys: Vec<String> = names.iter().map(|name| name.key()).collect();
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.locks.with_keys(&keys, f)
    }

    /// Load a comp set, or `None` when no file exists for `name`.
    pub fn load(&self, name: &CompSetName) -> Result<Option<CompSet>> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Ok(None);
        }
        let loaded = read_file(&path)?;
        Ok(Some(loaded.comp_set))
    }

    /// Replace the persisted contents of `name` with `properties`.
    pub fn write(&self, name: &CompSetName, properties: &[CompSetProperty]) -> Result<()> {
        let path = self.path_for(name);
        let document = CompSetDocument {
            version: CURRENT_SCHEMA_VERSION,
            name: name.as_str().to_string(),
            properties: properties.to_vec(),
        };
        let bytes =
            serde_json::to_vec_pretty(&document).map_err(|source| StoreError::Serialize {
                name: name.as_str().to_string(),
                source,
            })?;

        // Truncate in place so the file keeps its creation time.
        let mut file = File::create(&path).map_err(|e| StoreError::io("create", &path, e))?;
        file.write_all(&bytes)
            .map_err(|e| StoreError::io("write", &path, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io("sync", &path, e))?;

        tracing::info!(
            comp_set = %name,
            properties = properties.len(),
            "saved comp set to {}",
            path.display()
        );
        Ok(())
    }

    /// Delete the file for `name`. Returns `false` when it did not exist.
    pub fn remove(&self, name: &CompSetName) -> Result<bool> {
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(comp_set = %name, "removed {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io("remove", &path, e)),
        }
    }

    /// Summaries of every comp set in the directory, sorted by name.
    ///
    /// A file that fails to parse is logged and skipped.
    pub fn list(&self) -> Result<Vec<CompSetListItem>> {
        let mut items = Vec::new();
        for path in self.comp_set_files()? {
            match read_file(&path) {
                Ok(loaded) => items.push(CompSetListItem::from(&loaded.comp_set)),
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable comp set file");
                }
            }
        }
        items.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(items)
    }

    /// Rewrite every bare-array comp set file in the current wrapper shape.
    ///
    /// Entries are stamped and deduplicated on the way through. Returns the
    /// display names of the comp sets that were rewritten.
    pub fn migrate_legacy(&self) -> Result<Vec<String>> {
        let mut migrated = Vec::new();
        for path in self.comp_set_files()? {
            let loaded = match read_file(&path) {
                Ok(loaded) if loaded.legacy => loaded,
                Ok(_) => continue,
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable comp set file");
                    continue;
                }
            };
            let name = match CompSetName::new(loaded.comp_set.name.clone()) {
                Ok(name) => name,
                Err(error) => {
                    tracing::warn!(%error, "cannot migrate {}", path.display());
                    continue;
                }
            };
            // Stems written before names were sanitized move to their key,
            // folding into whatever already lives there.
            let relocated = self.path_for(&name) != path;
            self.with_locked(&[&name], || {
                let existing = if relocated {
                    self.load(&name)?
                        .map(|comp_set| comp_set.properties)
                        .unwrap_or_default()
                } else {
                    Vec::new()
                };
                let properties = merge(existing, loaded.comp_set.properties);
                self.write(&name, &properties)
            })?;
            if relocated {
                fs::remove_file(&path).map_err(|e| StoreError::io("remove", &path, e))?;
            }
            tracing::info!(comp_set = %name, "migrated legacy comp set file");
            migrated.push(name.as_str().to_string());
        }
        Ok(migrated)
    }

    fn comp_set_files(&self) -> Result<Vec<PathBuf>> {
        let entries =
            fs::read_dir(&self.dir).map_err(|e| StoreError::io("read directory", &self.dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io("read directory", &self.dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION));
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_none_or(|name| name.starts_with('.'));
            if is_json && !hidden {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn read_file(path: &Path) -> Result<LoadedFile> {
    let bytes = fs::read(path).map_err(|e| StoreError::io("read", path, e))?;
    let metadata = fs::metadata(path).map_err(|e| StoreError::io("stat", path, e))?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string();

    let shape: StoredShape = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let (name, properties, legacy) = match shape {
        StoredShape::Current(document) => {
            if document.version > CURRENT_SCHEMA_VERSION {
                return Err(StoreError::UnsupportedVersion {
                    path: path.to_path_buf(),
                    found: document.version,
                    max_supported: CURRENT_SCHEMA_VERSION,
                });
            }
            (display_name(document.name, &stem), document.properties, false)
        }
        StoredShape::Legacy(properties) => (stem, properties, true),
    };

    let updated_at = metadata.modified().ok().map(DateTime::<Utc>::from);
    let created_at = metadata
        .created()
        .ok()
        .map(DateTime::<Utc>::from)
        .or(updated_at);

    Ok(LoadedFile {
        comp_set: CompSet {
            name,
            properties,
            created_at,
            updated_at,
        },
        legacy,
    })
}

/// The stored display name, unless it no longer maps to this file.
fn display_name(stored: String, stem: &str) -> String {
    match CompSetName::new(stored.clone()) {
        Ok(name) if name.key() == stem => name.as_str().to_string(),
        _ => {
            tracing::warn!(
                stored = %stored,
                file = %stem,
                "comp set name does not match its file, using the file name"
            );
            stem.to_string()
        }
    }
}
