//! Comp set endpoints

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use comps_core::{CompSetView, UpdateCompSet, UpdateOutcome};
use comps_model::{CompSet, CompSetListItem};

use super::blocking;
use crate::dto::{ApiResponse, RemainingResponse, RenameResponse, SaveCompSetRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const FAILED_LIST: &str = "Failed to read comp sets directory";
const FAILED_SAVE: &str = "Failed to save comp set";
const FAILED_READ: &str = "Failed to read comp set";
const FAILED_UPDATE: &str = "Failed to update comp set";
const FAILED_DELETE: &str = "Failed to delete comp set";
const FAILED_REMOVE: &str = "Failed to remove property";

/// List every comp set
pub async fn list_comp_sets(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CompSetListItem>>>> {
    let items = blocking(&state, FAILED_LIST, |service| {
        service
            .list()
            .map_err(|error| ApiError::comps(error, FAILED_LIST))
    })
    .await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// Create a comp set or merge properties into an existing one
pub async fn save_comp_set(
    State(state): State<AppState>,
    payload: Result<Json<SaveCompSetRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<CompSet>>> {
    let Json(request) = payload.map_err(bad_body)?;
    let (Some(name), Some(properties)) = (request.comp_set_name, request.properties) else {
        return Err(ApiError::BadRequest(
            "compSetName and properties are required".to_string(),
        ));
    };

    let comp_set = blocking(&state, FAILED_SAVE, move |service| {
        service
            .save(&name, properties)
            .map_err(|error| ApiError::comps(error, FAILED_SAVE))
    })
    .await?;
    Ok(Json(
        ApiResponse::ok(comp_set).with_message("Comp set saved successfully"),
    ))
}

/// One comp set, enriched from the comparables dataset
pub async fn get_comp_set(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ApiResponse<CompSetView>>> {
    let view = blocking(&state, FAILED_READ, move |service| {
        service
            .get(&name)
            .map_err(|error| ApiError::comps(error, FAILED_READ))
    })
    .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// Rename a comp set or replace its contents
pub async fn update_comp_set(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<UpdateCompSet>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<RenameResponse>>> {
    let Json(update) = payload.map_err(bad_body)?;

    let outcome = blocking(&state, FAILED_UPDATE, move |service| {
        service
            .update(&name, update)
            .map_err(|error| ApiError::comps(error, FAILED_UPDATE))
    })
    .await?;

    let response = match outcome {
        UpdateOutcome::Renamed { old_name, new_name } => {
            ApiResponse::ok(RenameResponse { old_name, new_name })
                .with_message("Comp set renamed successfully")
        }
        UpdateOutcome::Replaced { .. } => ApiResponse {
            success: true,
            data: None,
            message: Some("Comp set updated successfully".to_string()),
            error: None,
        },
    };
    Ok(Json(response))
}

/// Delete a comp set
pub async fn delete_comp_set(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    blocking(&state, FAILED_DELETE, move |service| {
        service
            .delete(&name)
            .map_err(|error| ApiError::comps(error, FAILED_DELETE))
    })
    .await?;
    Ok(Json(ApiResponse::message("Comp set deleted successfully")))
}

/// Remove one property from a comp set
pub async fn remove_property(
    State(state): State<AppState>,
    Path((name, property_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<RemainingResponse>>> {
    let remaining = blocking(&state, FAILED_REMOVE, move |service| {
        service
            .remove_property(&name, &property_id)
            .map_err(|error| ApiError::comps(error, FAILED_REMOVE))
    })
    .await?;
    Ok(Json(
        ApiResponse::ok(RemainingResponse { remaining })
            .with_message("Property removed successfully"),
    ))
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
