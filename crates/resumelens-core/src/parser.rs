//! Converter backends.
//!
//! The production backend shells out to a pdf2json-compatible converter.
//! The command is invoked with the PDF path as its sole argument and must
//! print the JSON document to stdout; any converter honoring that contract
//! can be substituted.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::error::ExtractError;

/// A one-shot PDF-to-JSON conversion.
///
/// Each call owns its own invocation; backends keep no per-call state, so
/// concurrent extractions never interfere.
#[async_trait]
pub trait ParserBackend: Send + Sync {
    /// Convert the PDF at `path` into the converter's JSON document.
    async fn parse(&self, path: &Path) -> Result<Value, ExtractError>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// Backend that runs an external pdf2json-compatible converter.
pub struct Pdf2JsonCli {
    command: String,
}

impl Pdf2JsonCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for Pdf2JsonCli {
    fn default() -> Self {
        Self::new("pdf2json")
    }
}

#[async_trait]
impl ParserBackend for Pdf2JsonCli {
    async fn parse(&self, path: &Path) -> Result<Value, ExtractError> {
        debug!("running {} on {}", self.command, path.display());

        let output = Command::new(&self.command)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExtractError::ExtractionFailed(format!("{}: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::ExtractionFailed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            ExtractError::ExtractionFailed(format!("converter emitted invalid JSON: {}", e))
        })
    }

    fn name(&self) -> &str {
        &self.command
    }
}
