//! File downloads: CSV and XLSX renderings of the comparables dataset and
//! of a single comp set.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use comps_export::{
    comp_set_workbook, comp_set_workbook_filename, dataset_csv_filename, dataset_workbook,
    dataset_workbook_filename, export_date, properties_csv, units_csv, units_csv_filename,
};

use super::blocking;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const CSV_CONTENT_TYPE: &str = "text/csv";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const FAILED_CSV: &str = "Failed to generate CSV export";
const FAILED_UNITS_CSV: &str = "Failed to generate units CSV export";
const FAILED_XLS: &str = "Failed to generate Excel export";

/// A rendered file ready to send.
struct Download {
    content_type: &'static str,
    filename: String,
    bytes: Vec<u8>,
}

impl IntoResponse for Download {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Properties of the comparables dataset as CSV
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let download = blocking(&state, FAILED_CSV, |service| {
        let data = service
            .comparables()
            .map_err(|error| ApiError::comps(error, FAILED_CSV))?;
        let bytes = properties_csv(&data.comparable_properties)
            .map_err(|error| ApiError::export(error, FAILED_CSV))?;
        Ok(Download {
            content_type: CSV_CONTENT_TYPE,
            filename: dataset_csv_filename(export_date()),
            bytes,
        })
    })
    .await?;
    Ok(download.into_response())
}

/// Unit mix of every property in the comparables dataset as CSV
pub async fn export_units_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let download = blocking(&state, FAILED_UNITS_CSV, |service| {
        let data = service
            .comparables()
            .map_err(|error| ApiError::comps(error, FAILED_UNITS_CSV))?;
        let bytes = units_csv(&data.comparable_properties)
            .map_err(|error| ApiError::export(error, FAILED_UNITS_CSV))?;
        Ok(Download {
            content_type: CSV_CONTENT_TYPE,
            filename: units_csv_filename(export_date()),
            bytes,
        })
    })
    .await?;
    Ok(download.into_response())
}

/// The comparables dataset as a workbook
pub async fn export_xls(State(state): State<AppState>) -> ApiResult<Response> {
    let download = blocking(&state, FAILED_XLS, |service| {
        let data = service
            .comparables()
            .map_err(|error| ApiError::comps(error, FAILED_XLS))?;
        let date = export_date();
        let bytes = dataset_workbook(&data, date)
            .map_err(|error| ApiError::export(error, FAILED_XLS))?;
        Ok(Download {
            content_type: XLSX_CONTENT_TYPE,
            filename: dataset_workbook_filename(date),
            bytes,
        })
    })
    .await?;
    Ok(download.into_response())
}

/// One enriched comp set as a workbook
pub async fn export_comp_set_xls(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    let download = blocking(&state, FAILED_XLS, move |service| {
        let view = service
            .get(&name)
            .map_err(|error| ApiError::comps(error, FAILED_XLS))?;
        let date = export_date();
        let records = view.properties.iter().map(|property| &property.record);
        let bytes = comp_set_workbook(&view.name, records, date).map_err(|error| match error {
            comps_export::ExportError::NoProperties => {
                ApiError::NotFound("No properties to export".to_string())
            }
            other => ApiError::export(other, FAILED_XLS),
        })?;
        Ok(Download {
            content_type: XLSX_CONTENT_TYPE,
            filename: comp_set_workbook_filename(&view.name, date),
            bytes,
        })
    })
    .await?;
    Ok(download.into_response())
}
