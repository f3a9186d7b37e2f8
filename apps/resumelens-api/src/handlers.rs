//! HTTP handlers for the resumelens API

use std::io::Write;

use axum::extract::{Multipart, State};
use axum::Json;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::{HealthResponse, UploadResponse, SUGGESTIONS};
use crate::AppState;

/// Handler: GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "resumelens-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /upload
///
/// Accepts one multipart file field (conventionally `resume`), stages it in
/// a temp file for the duration of the request, and returns the extracted
/// text with canned feedback. The staged file is removed on every exit path
/// when its guard drops.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_resume_field(multipart)
        .await?
        .ok_or(ApiError::NoFileProvided)?;

    info!(
        "received upload: field={} filename={:?} ({} bytes)",
        upload.field,
        upload.filename,
        upload.bytes.len()
    );

    let mut staged = NamedTempFile::new()?;
    staged.write_all(&upload.bytes)?;
    staged.flush()?;

    let text = state.extractor.extract_text(staged.path()).await?;
    debug!("extracted text ({} chars)", text.len());

    Ok(Json(UploadResponse {
        text_analysis: text,
        suggestions: SUGGESTIONS.to_string(),
    }))
}

struct ResumeUpload {
    field: String,
    filename: Option<String>,
    bytes: Vec<u8>,
}

/// Walk the multipart stream and pick the uploaded file: the `resume` field
/// if present, otherwise the first part carrying a filename.
async fn read_resume_field(mut multipart: Multipart) -> Result<Option<ResumeUpload>, ApiError> {
    let mut fallback = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(|f| f.to_string());
        let is_resume = name == "resume";

        if !is_resume && filename.is_none() {
            // Plain form value, not a file.
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
        let upload = ResumeUpload {
            field: name,
            filename,
            bytes: bytes.to_vec(),
        };

        if is_resume {
            return Ok(Some(upload));
        }
        if fallback.is_none() {
            fallback = Some(upload);
        }
    }

    Ok(fallback)
}
