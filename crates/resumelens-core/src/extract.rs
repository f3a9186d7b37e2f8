//! Extraction driver: one PDF path in, one flat string out.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::document::ParsedDocument;
use crate::error::ExtractError;
use crate::parser::ParserBackend;

/// Default deadline for a single conversion.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Drives a single conversion per call: parse under a deadline, normalize
/// the result shape, flatten to text.
pub struct Extractor {
    backend: Box<dyn ParserBackend>,
    timeout_ms: u64,
}

impl Extractor {
    pub fn new(backend: Box<dyn ParserBackend>, timeout_ms: u64) -> Self {
        Self {
            backend,
            timeout_ms,
        }
    }

    /// Extract the flattened text of the PDF at `path`.
    ///
    /// A backend that never completes is cut off at the deadline and
    /// reported as [`ExtractError::Timeout`] rather than hanging the
    /// request.
    pub async fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let raw = tokio::time::timeout(
            Duration::from_millis(self.timeout_ms),
            self.backend.parse(path),
        )
        .await
        .map_err(|_| ExtractError::Timeout(self.timeout_ms))??;

        let document = ParsedDocument::from_raw(raw)?;
        let text = document.flatten_text()?;
        debug!(
            "extracted {} chars from {} pages via {}",
            text.len(),
            document.pages.len(),
            self.backend.name()
        );
        Ok(text)
    }
}
