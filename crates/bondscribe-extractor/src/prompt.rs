//! LLM prompt engineering for bond extraction

use bondscribe_domain::schema::{BondField, BUSINESS_SECTORS};
use std::fmt::Write;

/// Builds the single system instruction for bond extraction
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for the given message
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Instruction and rules
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push('\n');

        // 2. Field schema, one line per field
        prompt.push_str("3. Include all these fields (use null if not found):\n");
        for field in BondField::ALL {
            let _ = writeln!(prompt, "    - {}", field_line(field));
        }
        prompt.push('\n');

        // 3. The text to analyze
        let _ = writeln!(prompt, "Input text: {}", self.text);
        prompt.push('\n');

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

fn field_line(field: BondField) -> String {
    match field {
        BondField::BusinessSector => format!(
            "{} ({}, such as {}. Example: \"ECL FINANCE LIMITED\" → \"NBFC\")",
            field.key(),
            field.prompt_hint(),
            BUSINESS_SECTORS
                .iter()
                .map(|s| format!("\"{}\"", s))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        _ => format!("{} ({})", field.key(), field.prompt_hint()),
    }
}

const EXTRACTION_INSTRUCTIONS: &str = "Please extract bond details from the following text and provide them in a strict JSON format according to these rules:

1. Return ONLY a valid JSON object, nothing else
2. Extract the values for ISIN, security detail(info), issuer, Coupon, Maturity, Quantam(QTM), offer for each bond.";

const OUTPUT_FORMAT_REMINDER: &str =
    "Respond with ONLY the JSON object, no additional text or formatting.";
