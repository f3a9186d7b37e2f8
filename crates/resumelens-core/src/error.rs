use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF converter failed: {0}")]
    ExtractionFailed(String),

    #[error("unexpected PDF structure: {raw}")]
    MalformedStructure { raw: serde_json::Value },

    #[error("extraction timed out after {0}ms")]
    Timeout(u64),

    #[error("text fragment is not valid UTF-8 after percent-decoding: {0}")]
    InvalidTextEncoding(String),
}
