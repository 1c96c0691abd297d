//! Default data locations.

use std::path::PathBuf;

/// Environment variable overriding the comp sets directory.
pub const COMP_SETS_DIR_ENV_VAR: &str = "COMPS_SETS_DIR";

/// Environment variable overriding the canonical dataset file.
pub const DATA_FILE_ENV_VAR: &str = "COMPS_DATA_FILE";

/// Directory holding one JSON file per comp set.
///
/// Resolution order:
/// 1. `COMPS_SETS_DIR` environment variable
/// 2. `comp_sets/` relative to the working directory
pub fn default_comp_sets_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(COMP_SETS_DIR_ENV_VAR) {
        return PathBuf::from(dir);
    }
    PathBuf::from("comp_sets")
}

/// Canonical dataset written by the extraction pipeline.
///
/// Resolution order:
/// 1. `COMPS_DATA_FILE` environment variable
/// 2. `output/comparables_data.json` relative to the working directory
pub fn default_comparables_path() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_FILE_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from("output").join("comparables_data.json")
}
