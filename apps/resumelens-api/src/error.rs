//! Error types for the resumelens API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use resumelens_core::ExtractError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no file attached to upload")]
    NoFileProvided,

    #[error("invalid multipart body: {0}")]
    InvalidUpload(String),

    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error(transparent)]
    Extraction(#[from] ExtractError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NoFileProvided => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Please upload a file" })),
            )
                .into_response(),
            ApiError::InvalidUpload(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response()
            }
            ApiError::Staging(e) => {
                tracing::error!("upload staging failed: {}", e);
                extraction_failure("STAGING_IO", Value::from(e.to_string()))
            }
            ApiError::Extraction(err) => {
                tracing::error!("extraction failed: {}", err);
                let (code, details) = match err {
                    ExtractError::MalformedStructure { raw } => ("MALFORMED_DOCUMENT", raw),
                    ExtractError::Timeout(ms) => {
                        ("TIMEOUT", Value::from(format!("timed out after {}ms", ms)))
                    }
                    other => ("EXTRACTION_FAILED", Value::from(other.to_string())),
                };
                extraction_failure(code, details)
            }
        }
    }
}

/// All extraction failures share one user-visible message; the `code` and
/// `details` fields carry the distinguishing diagnostics.
fn extraction_failure(code: &str, details: Value) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Failed to extract text from PDF",
            "code": code,
            "details": details,
        })),
    )
        .into_response()
}
