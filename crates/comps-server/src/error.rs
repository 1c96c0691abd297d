//! API error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use comps_core::{CompsError, ErrorKind};
use comps_export::{ExportError, MISSING_DATASET_MESSAGE};

use crate::dto::ApiResponse;

/// API error types.
///
/// Every variant carries the message shown to the client. Storage failures
/// are logged where they are converted and only a stable per-operation
/// message leaves the server.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a lifecycle error, using `failure` as the 500 message.
    pub fn comps(error: CompsError, failure: &'static str) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(
                match error {
                    CompsError::PropertyNotFound { .. } => "Property not found in comp set",
                    _ => "Comp set not found",
                }
                .to_string(),
            ),
            ErrorKind::Conflict => {
                Self::Conflict("Comp set with new name already exists".to_string())
            }
            ErrorKind::Validation => Self::BadRequest(error.to_string()),
            ErrorKind::UpstreamUnavailable => Self::NotFound(MISSING_DATASET_MESSAGE.to_string()),
            ErrorKind::StorageIo => {
                tracing::error!(error = %error, "{failure}");
                Self::Internal(failure.to_string())
            }
        }
    }

    /// Map an export rendering error, using `failure` as the 500 message.
    pub fn export(error: ExportError, failure: &'static str) -> Self {
        match error {
            ExportError::NoProperties => {
                Self::NotFound("No properties found in comparables data.".to_string())
            }
            ExportError::NoUnits => {
                Self::NotFound("No unit details found in comparables data.".to_string())
            }
            other => {
                tracing::error!(error = %other, "{failure}");
                Self::Internal(failure.to_string())
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Conflict(message)
            | Self::Internal(message) => message,
        };
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors starting the server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid listen address {address}: {source}")]
    Address {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to open comp set storage: {0}")]
    Storage(#[from] CompsError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
