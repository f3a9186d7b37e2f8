//! PDF text extraction over a pdf2json-compatible converter.
//!
//! The converter is a black box: given a PDF path it produces a page/text-run
//! JSON document in one of two known top-level shapes (a legacy `formImage`
//! container, or the page array directly at the top level). This crate
//! normalizes either shape into a canonical [`ParsedDocument`] and flattens it
//! into a single string: runs joined with a space within a page, pages joined
//! with a newline, each fragment percent-decoded.

pub mod document;
pub mod error;
pub mod extract;
pub mod parser;

pub use document::{Page, ParsedDocument, TextFragment, TextRun};
pub use error::ExtractError;
pub use extract::{Extractor, DEFAULT_TIMEOUT_MS};
pub use parser::{ParserBackend, Pdf2JsonCli};
