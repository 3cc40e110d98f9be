use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use initdata_core::VerifyError;
use serde_json::json;
use thiserror::Error;

/// Failure of a request to the verification endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error("internal: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Verify(VerifyError::MissingPayload) => {
                (StatusCode::BAD_REQUEST, json!({ "error": "initData is required" }))
            }
            ApiError::Verify(VerifyError::MissingSecret) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "verified": false, "error": "Bot token not configured" }),
            ),
            ApiError::Verify(VerifyError::MissingHash) => (
                StatusCode::BAD_REQUEST,
                json!({ "verified": false, "error": "Hash not found in initData" }),
            ),
            ApiError::Verify(VerifyError::Expired) => {
                (StatusCode::BAD_REQUEST, json!({ "verified": false, "error": "initData expired" }))
            }
            ApiError::Verify(VerifyError::Malformed(_)) | ApiError::Internal(_) => {
                tracing::error!(error = %self, "error verifying initData");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "verified": false, "error": "Internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
