use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Challenge request failed: {0}")]
    Challenge(String),

    #[error("Signature verification failed: {0}")]
    Verification(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Asset lookup failed: {0}")]
    Assets(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Challenge(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Verification(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            // Auth failures carry no body
            AppError::Unauthorized => return StatusCode::FORBIDDEN.into_response(),
            AppError::Assets(msg) => (
                StatusCode::CONFLICT,
                json!({ "message": format!("error occurred: {}", msg) }),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}
