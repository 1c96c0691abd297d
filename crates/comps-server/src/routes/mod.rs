//! API route handlers

pub mod comp_sets;
pub mod comparables;
pub mod export;
pub mod health;

use axum::{
    Router,
    routing::{delete, get},
};
use comps_core::CompSetService;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Comp sets
        .route(
            "/api/comp-sets",
            get(comp_sets::list_comp_sets).post(comp_sets::save_comp_set),
        )
        .route(
            "/api/comp-sets/{name}",
            get(comp_sets::get_comp_set)
                .put(comp_sets::update_comp_set)
                .delete(comp_sets::delete_comp_set),
        )
        .route(
            "/api/comp-sets/{name}/properties/{property_id}",
            delete(comp_sets::remove_property),
        )
        .route(
            "/api/comp-sets/{name}/export/xls",
            get(export::export_comp_set_xls),
        )
        // Canonical dataset
        .route("/api/comparables", get(comparables::get_comparables))
        .route("/api/export/csv", get(export::export_csv))
        .route("/api/export/csv-units", get(export::export_units_csv))
        .route("/api/export/xls", get(export::export_xls))
        .with_state(state)
}

/// Run `f` against the service on the blocking pool.
///
/// Comp set files are read and written with blocking `std::fs` calls.
pub(crate) async fn blocking<T, F>(state: &AppState, failure: &'static str, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&CompSetService) -> ApiResult<T> + Send + 'static,
{
    let service = state.service.clone();
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|error| {
            tracing::error!(%error, "{failure}");
            ApiError::Internal(failure.to_string())
        })?
}
