//! HTTP API for comp sets.
//!
//! ## Endpoints
//!
//! - GET /health
//! - GET /api/comp-sets - List comp sets
//! - POST /api/comp-sets - Create a comp set or merge into one
//! - GET /api/comp-sets/{name} - Enriched comp set with stats
//! - PUT /api/comp-sets/{name} - Rename or replace contents
//! - DELETE /api/comp-sets/{name} - Delete a comp set
//! - DELETE /api/comp-sets/{name}/properties/{property_id} - Remove one property
//! - GET /api/comp-sets/{name}/export/xls - Comp set workbook
//! - GET /api/comparables - Comparables dataset
//! - GET /api/export/csv, /api/export/csv-units, /api/export/xls - Dataset downloads

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult, ServerError};
pub use routes::create_router;
pub use server::{create_server, run_server};
pub use state::{ApiConfig, AppState};
