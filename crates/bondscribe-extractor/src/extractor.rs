//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::fallback::RegexExtractor;
use crate::prompt::PromptBuilder;
use crate::sanitizer::sanitize_with;
use crate::types::{ExtractionReport, ExtractionSource};
use bondscribe_domain::traits::LlmProvider;
use bondscribe_domain::{BondRecord, ChatMessage, CompletionRequest};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// The Extractor turns a free-text chat message into bond records
///
/// The LLM is tried first; any failure along that path (provider error,
/// empty output, no JSON, malformed JSON, schema mismatch under the strict
/// policy) hands the original message to the [`RegexExtractor`]. Extraction
/// therefore never fails.
pub struct BondExtractor<L> {
    llm: L,
    config: ExtractorConfig,
    fallback: RegexExtractor,
}

impl<L> BondExtractor<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Extractor
    pub fn new(llm: L, config: ExtractorConfig) -> Self {
        let fallback = RegexExtractor::new().with_quantam_unit(config.fallback_quantam_unit);
        Self {
            llm,
            config,
            fallback,
        }
    }

    /// Create an Extractor after validating the configuration
    pub fn try_new(llm: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self::new(llm, config))
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The fallback extractor used when the LLM path fails
    pub fn fallback(&self) -> &RegexExtractor {
        &self.fallback
    }

    /// Extract bond records from a message
    ///
    /// Always returns at least one record with all nine fields present.
    pub fn extract_bond_data(&self, message: &str) -> Vec<BondRecord> {
        self.extract_with_report(message).records
    }

    /// Extract bond records and report which path produced them
    pub fn extract_with_report(&self, message: &str) -> ExtractionReport {
        match self.extract_via_llm(message) {
            Ok(record) => {
                info!("Extracted bond data via LLM");
                ExtractionReport {
                    records: vec![record],
                    source: ExtractionSource::Llm,
                }
            }
            Err(reason) => {
                warn!("Falling back to regex extraction: {}", reason);
                ExtractionReport {
                    records: self.fallback.extract(message),
                    source: ExtractionSource::Fallback(reason),
                }
            }
        }
    }

    fn extract_via_llm(&self, message: &str) -> Result<BondRecord, ExtractorError> {
        let prompt = PromptBuilder::new(message).build();
        debug!("Prompt length: {} chars", prompt.len());

        let request = CompletionRequest::new(
            vec![ChatMessage::system(prompt)],
            self.config.model.clone(),
            self.config.temperature,
        );

        let response = self
            .llm
            .complete(&request)
            .map_err(|e| ExtractorError::Provider(e.to_string()))?;

        if response.trim().is_empty() {
            return Err(ExtractorError::EmptyResponse);
        }
        debug!("LLM response length: {} chars", response.len());

        sanitize_with(&response, self.config.schema_policy)
    }
}
