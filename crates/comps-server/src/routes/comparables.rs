//! Canonical dataset passthrough

use axum::{Json, extract::State};

use comps_model::ComparablesData;

use super::blocking;
use crate::dto::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const FAILED_READ: &str = "Failed to read comparables data";

/// The comparables dataset exactly as the extraction run wrote it.
pub async fn get_comparables(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<ComparablesData>>> {
    let data = blocking(&state, FAILED_READ, |service| {
        service
            .comparables()
            .map_err(|error| ApiError::comps(error, FAILED_READ))
    })
    .await?;
    Ok(Json(ApiResponse::ok(data)))
}
