//! Wire types for the resumelens API

use serde::Serialize;

/// Canned feedback returned with every successful extraction.
pub const SUGGESTIONS: &str = "The resume layout is clear, but consider improving margin spacing. \
     The design is solid overall. (Simulated feedback)";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Successful upload response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Extracted document text; empty for a PDF with no text, never null.
    pub text_analysis: String,
    /// Canned feedback string.
    pub suggestions: String,
}
