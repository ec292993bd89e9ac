use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use corelib::models::ReadingError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Body was not JSON, or the reading could not become a record.
    #[error("invalid data format: {0}")]
    InvalidPayload(String),

    /// Read of the latest sample while the buffer is empty.
    #[error("no data available")]
    NoData,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ReadingError> for ApiError {
    fn from(e: ReadingError) -> Self {
        ApiError::InvalidPayload(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidPayload(detail) => {
                tracing::warn!(detail = %detail, "rejected telemetry payload");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "success": false,
                        "error": "Invalid data format",
                        "detail": detail,
                    })),
                )
                    .into_response()
            }
            ApiError::NoData => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "message": "No data available",
                })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Internal server error",
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            ApiError::InvalidPayload("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NoData.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn reading_errors_become_invalid_payload() {
        let e: ApiError = ReadingError::MissingTemperature.into();
        assert!(matches!(e, ApiError::InvalidPayload(ref d) if d.contains("temperature")));
    }
}
