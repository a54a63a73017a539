//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur inside the extraction pipeline
///
/// None of these reach callers of [`crate::BondExtractor::extract_bond_data`];
/// they are reported on the [`crate::ExtractionReport`] and in logs, and the
/// regex fallback produces the record instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Provider(String),

    /// The model answered with blank text
    #[error("LLM returned no content")]
    EmptyResponse,

    /// No `{ ... }` span in the model output
    #[error("No valid JSON found in response")]
    NoJsonFound,

    /// A `{ ... }` span was found but does not parse
    #[error("JSON parsing error: {0}")]
    MalformedJson(String),

    /// Parsed JSON does not fit the bond schema under the strict policy
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::MalformedJson(e.to_string())
    }
}
