//! Resumelens API Server - resume upload and text extraction
//!
//! Accepts a resume PDF via multipart upload, extracts its text through a
//! pdf2json-compatible converter, and returns the text together with canned
//! layout feedback. No analysis is performed server-side; the converter does
//! all the parsing work.

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use resumelens_core::{Extractor, Pdf2JsonCli, DEFAULT_TIMEOUT_MS};

mod error;
mod handlers;
mod models;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("resumelens_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let converter = std::env::var("PDF2JSON_BIN").unwrap_or_else(|_| "pdf2json".to_string());
    let timeout_ms: u64 = std::env::var("EXTRACT_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

    info!("Using converter '{}' with {}ms timeout", converter, timeout_ms);

    let state = AppState {
        extractor: Arc::new(Extractor::new(
            Box::new(Pdf2JsonCli::new(converter)),
            timeout_ms,
        )),
    };

    let app = router(state, max_upload_bytes);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting resumelens API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router; shared with the endpoint tests.
fn router(state: AppState, max_upload_bytes: usize) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/upload", post(handlers::upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
