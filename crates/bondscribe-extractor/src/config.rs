//! Configuration for the Extractor

use crate::classifier::InstructionSet;
use bondscribe_llm::groq::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// How parsed model JSON is reconciled against the nine-field bond schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaPolicy {
    /// Coerce what can be coerced, null out the rest, drop unknown keys
    #[default]
    Lenient,
    /// Any missing key or type mismatch rejects the response
    Strict,
}

/// Unit applied to the number captured before an "L" by the regex fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantamUnit {
    /// Keep the captured digits as-is ("5L" becomes 5)
    #[default]
    Raw,
    /// Multiply by one Lakh ("5L" becomes 500000), matching the LLM prompt
    Lakh,
}

/// Configuration for the Extractor and Classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Model identifier passed to the provider
    pub model: String,

    /// Sampling temperature for every call
    pub temperature: f32,

    /// Reconciliation of model JSON against the schema
    pub schema_policy: SchemaPolicy,

    /// Unit used by the regex fallback for quantam
    pub fallback_quantam_unit: QuantamUnit,

    /// Label set and instructions used by the classifier
    pub instruction_set: InstructionSet,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature {} out of range [0.0, 2.0]",
                self.temperature
            ));
        }
        Ok(())
    }

    /// Strict preset: reject model output that does not fit the schema exactly
    pub fn strict() -> Self {
        Self {
            schema_policy: SchemaPolicy::Strict,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    /// Near-deterministic sampling, lenient schema, raw fallback quantam
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            schema_policy: SchemaPolicy::Lenient,
            fallback_quantam_unit: QuantamUnit::Raw,
            instruction_set: InstructionSet::BidOffer,
        }
    }
}
