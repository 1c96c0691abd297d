//! Read access to the canonical dataset produced by the extraction run.

use std::fs;
use std::path::Path;

use comps_model::ComparablesData;

use crate::error::{Result, StoreError};

/// Load the canonical dataset at `path`.
///
/// Returns `Ok(None)` when the file does not exist; read and parse failures
/// are errors. The file is read on every call.
pub fn load_comparables(path: &Path) -> Result<Option<ComparablesData>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io("read", path, e)),
    };
    let data: ComparablesData =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(
        properties = data.comparable_properties.len(),
        "loaded comparables from {}",
        path.display()
    );
    Ok(Some(data))
}
