//! Bondscribe Extractor
//!
//! Converts free-text trading chat into structured bond records, and
//! classifies messages by intent.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → LLM → sanitize → reconcile → BondRecord
//!                         │         │          │
//!                         └─────────┴──────────┴──(any failure)──→ RegexExtractor → BondRecord
//!
//! Text → InstructionSet → LLM → label (or None)
//! ```
//!
//! # Key Features
//!
//! - **Total extraction**: `extract_bond_data` never fails; the regex
//!   fallback guarantees a nine-field record for every input
//! - **JSON repair**: commentary and markdown fences around the model's JSON
//!   are tolerated
//! - **Schema reconciliation**: lenient coercion or strict rejection of the
//!   model's JSON against the bond schema
//! - **Diagnostics**: `extract_with_report` says why the fallback ran
//!
//! # Example Usage
//!
//! ```
//! use bondscribe_extractor::{BondExtractor, ExtractorConfig};
//! use bondscribe_llm::MockProvider;
//!
//! let llm = MockProvider::new(r#"Here you go: {"isinNo": "INE0ABC12345", "coupon": 9.5}"#);
//! let extractor = BondExtractor::new(llm, ExtractorConfig::default());
//!
//! let records = extractor.extract_bond_data("ECL FINANCE 9.5% NCD INE0ABC12345");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].coupon, Some(9.5));
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod extractor;
mod fallback;
mod prompt;
mod reconcile;
mod sanitizer;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::{InstructionSet, IntentClassifier};
pub use config::{ExtractorConfig, QuantamUnit, SchemaPolicy};
pub use error::ExtractorError;
pub use extractor::BondExtractor;
pub use fallback::{compact_date_to_iso, RegexExtractor};
pub use prompt::PromptBuilder;
pub use reconcile::{normalize_date, reconcile};
pub use sanitizer::{extract_json_object, sanitize, sanitize_with};
pub use types::{ExtractionReport, ExtractionSource};
