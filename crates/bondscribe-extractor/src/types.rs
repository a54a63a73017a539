//! Result types for extraction

use crate::error::ExtractorError;
use bondscribe_domain::BondRecord;

/// Which path produced the records of an extraction
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionSource {
    /// The model's JSON was parsed and reconciled
    Llm,
    /// The regex extractor ran because the LLM path failed
    Fallback(ExtractorError),
}

/// Records plus the diagnostic of how they were produced
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    /// Extracted records; never empty
    pub records: Vec<BondRecord>,

    /// Path that produced `records`
    pub source: ExtractionSource,
}

impl ExtractionReport {
    /// True when the regex fallback produced the records
    pub fn used_fallback(&self) -> bool {
        matches!(self.source, ExtractionSource::Fallback(_))
    }

    /// Why the fallback ran, if it did
    pub fn fallback_reason(&self) -> Option<&ExtractorError> {
        match &self.source {
            ExtractionSource::Llm => None,
            ExtractionSource::Fallback(reason) => Some(reason),
        }
    }
}
