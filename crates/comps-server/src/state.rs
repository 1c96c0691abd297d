//! Shared handler state and server configuration.

use std::path::PathBuf;
use std::sync::Arc;

use comps_core::CompSetService;
use comps_store::paths::{default_comparables_path, default_comp_sets_dir};

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<CompSetService>,
}

impl AppState {
    pub fn new(service: CompSetService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Listener and storage settings for [`crate::server::run_server`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub comp_sets_dir: PathBuf,
    pub comparables_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            enable_cors: true,
            comp_sets_dir: default_comp_sets_dir(),
            comparables_path: default_comparables_path(),
        }
    }
}
