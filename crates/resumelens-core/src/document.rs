//! Wire model of the converter's JSON document and its normalization.
//!
//! Converter versions before 2.0 wrap the page array in a `formImage`
//! container; 2.x emits it at the top level. Both decode into the same
//! [`ParsedDocument`]. The field names (`Pages`, `Texts`, `R`, `T`) are the
//! converter's, not ours.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ExtractError;

/// A percent-encoded fragment of text within a run.
#[derive(Debug, Clone, Deserialize)]
pub struct TextFragment {
    /// Percent-encoded text payload.
    #[serde(rename = "T")]
    pub text: String,
}

/// One text run within a page's content stream.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRun {
    /// Sub-run fragments; may be absent or empty.
    #[serde(rename = "R", default)]
    pub fragments: Vec<TextFragment>,
}

/// A single page: an ordered sequence of text runs.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(rename = "Texts", default)]
    pub texts: Vec<TextRun>,
}

/// Canonical document: the page array, whichever shape it arrived in.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedDocument {
    #[serde(rename = "Pages")]
    pub pages: Vec<Page>,
}

/// The two top-level shapes the converter is known to emit.
///
/// Untagged decoding tries the legacy container first, so a document
/// carrying both keys resolves the same way the probing in older clients
/// did.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Legacy {
        #[serde(rename = "formImage")]
        form_image: ParsedDocument,
    },
    Direct(ParsedDocument),
}

impl ParsedDocument {
    /// Normalize a raw converter result into the canonical document.
    ///
    /// Anything that matches neither shape fails with the full value so the
    /// offending structure can be diagnosed from logs.
    pub fn from_raw(value: Value) -> Result<Self, ExtractError> {
        match serde_json::from_value::<RawDocument>(value.clone()) {
            Ok(RawDocument::Legacy { form_image }) => Ok(form_image),
            Ok(RawDocument::Direct(doc)) => Ok(doc),
            Err(_) => Err(ExtractError::MalformedStructure { raw: value }),
        }
    }

    /// Flatten the document into a single string.
    ///
    /// Runs within a page are joined with a single space, pages with a
    /// single newline. A run without fragments contributes an empty string,
    /// not an omission, so word spacing survives around it; a page without
    /// runs contributes an empty line.
    pub fn flatten_text(&self) -> Result<String, ExtractError> {
        let mut pages = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let mut runs = Vec::with_capacity(page.texts.len());
            for run in &page.texts {
                match run.fragments.first() {
                    Some(fragment) => runs.push(decode_fragment(&fragment.text)?),
                    None => runs.push(String::new()),
                }
            }
            pages.push(runs.join(" "));
        }
        Ok(pages.join("\n"))
    }
}

fn decode_fragment(encoded: &str) -> Result<String, ExtractError> {
    urlencoding::decode(encoded)
        .map(|text| text.into_owned())
        .map_err(|e| ExtractError::InvalidTextEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn run(text: &str) -> Value {
        json!({ "R": [{ "T": text }] })
    }

    fn page(runs: Vec<Value>) -> Value {
        json!({ "Texts": runs })
    }

    fn flatten(value: Value) -> String {
        ParsedDocument::from_raw(value)
            .unwrap()
            .flatten_text()
            .unwrap()
    }

    #[test]
    fn direct_shape_normalizes() {
        let doc = ParsedDocument::from_raw(json!({ "Pages": [page(vec![run("Hello")])] })).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].texts.len(), 1);
    }

    #[test]
    fn legacy_shape_normalizes() {
        let value = json!({ "formImage": { "Pages": [page(vec![run("Hello")])] } });
        let doc = ParsedDocument::from_raw(value).unwrap();
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn legacy_container_wins_when_both_shapes_present() {
        let value = json!({
            "formImage": { "Pages": [page(vec![run("legacy")])] },
            "Pages": [page(vec![run("direct")]), page(vec![run("direct")])],
        });
        let doc = ParsedDocument::from_raw(value).unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.flatten_text().unwrap(), "legacy");
    }

    #[test]
    fn unknown_shape_fails_with_raw_value() {
        let value = json!({ "Transcoder": "v3", "Body": [1, 2, 3] });
        let err = ParsedDocument::from_raw(value.clone()).unwrap_err();
        match err {
            ExtractError::MalformedStructure { raw } => assert_eq!(raw, value),
            other => panic!("expected MalformedStructure, got {other:?}"),
        }
    }

    #[test]
    fn extra_metadata_keys_are_ignored() {
        let value = json!({
            "Transcoder": "pdf2json@3",
            "Meta": { "PDFFormatVersion": "1.7" },
            "Pages": [page(vec![run("Hello")])],
        });
        assert_eq!(flatten(value), "Hello");
    }

    #[test]
    fn single_run_flattens_to_its_text() {
        assert_eq!(flatten(json!({ "Pages": [page(vec![run("Hello")])] })), "Hello");
    }

    #[test]
    fn pages_join_with_newline() {
        let value = json!({ "Pages": [page(vec![run("Page1")]), page(vec![run("Page2")])] });
        assert_eq!(flatten(value), "Page1\nPage2");
    }

    #[test]
    fn runs_join_with_space() {
        let value = json!({ "Pages": [page(vec![run("Foo"), run("Bar")])] });
        assert_eq!(flatten(value), "Foo Bar");
    }

    #[test]
    fn empty_page_contributes_empty_line() {
        let value = json!({ "Pages": [page(vec![]), page(vec![run("Page2")])] });
        assert_eq!(flatten(value), "\nPage2");
    }

    #[test]
    fn run_without_fragments_contributes_empty_string() {
        // The space-join still surrounds the empty contribution.
        let value = json!({ "Pages": [page(vec![run("Foo"), json!({ "R": [] }), run("Bar")])] });
        assert_eq!(flatten(value), "Foo  Bar");
    }

    #[test]
    fn run_with_absent_fragment_list_contributes_empty_string() {
        let value = json!({ "Pages": [page(vec![run("Foo"), json!({}), run("Bar")])] });
        assert_eq!(flatten(value), "Foo  Bar");
    }

    #[test]
    fn fragments_are_percent_decoded() {
        let value = json!({ "Pages": [page(vec![run("Hello%20World%21")])] });
        assert_eq!(flatten(value), "Hello World!");
    }

    #[test]
    fn only_first_fragment_of_a_run_is_used() {
        let value = json!({
            "Pages": [{ "Texts": [{ "R": [{ "T": "first" }, { "T": "second" }] }] }],
        });
        assert_eq!(flatten(value), "first");
    }

    #[test]
    fn invalid_utf8_after_decoding_fails() {
        let value = json!({ "Pages": [page(vec![run("%FF")])] });
        let err = ParsedDocument::from_raw(value)
            .unwrap()
            .flatten_text()
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidTextEncoding(_)));
    }

    proptest! {
        /// Percent-encoding then flattening gives the original text back.
        #[test]
        fn encoded_fragment_round_trips(text in ".{0,40}") {
            let encoded = urlencoding::encode(&text).into_owned();
            let value = json!({ "Pages": [page(vec![run(&encoded)])] });
            prop_assert_eq!(flatten(value), text);
        }

        /// N pages always produce N newline-separated segments.
        #[test]
        fn page_count_matches_line_count(n in 1usize..12) {
            let pages: Vec<Value> = (0..n).map(|_| page(vec![])).collect();
            let flat = flatten(json!({ "Pages": pages }));
            prop_assert_eq!(flat.split('\n').count(), n);
        }
    }
}
