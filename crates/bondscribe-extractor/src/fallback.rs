//! Deterministic regex extraction, the terminal branch of the pipeline

use crate::config::QuantamUnit;
use bondscribe_domain::schema::{month_number, BondField, LAKH};
use bondscribe_domain::BondRecord;
use once_cell::sync::Lazy;
use regex::Regex;

fn field_regex(field: BondField) -> Regex {
    // Patterns are compile-time constants from the schema table
    Regex::new(field.pattern().unwrap_or("$^")).expect("schema pattern is a valid regex")
}

static ISIN: Lazy<Regex> = Lazy::new(|| field_regex(BondField::IsinNo));
static ISSUER: Lazy<Regex> = Lazy::new(|| field_regex(BondField::IssuerName));
static COUPON: Lazy<Regex> = Lazy::new(|| field_regex(BondField::Coupon));
static QUANTAM: Lazy<Regex> = Lazy::new(|| field_regex(BondField::Quantam));
static MATURITY: Lazy<Regex> = Lazy::new(|| field_regex(BondField::MaturityDate));

/// Best-effort field extraction from free text using fixed patterns
///
/// Never fails. Each field is matched independently (first match wins);
/// anything that does not match stays null. `rating`, `tenor`, `ytm` and
/// `business_sector` have no reliable textual signal and are always null.
///
/// # Examples
///
/// ```
/// use bondscribe_extractor::RegexExtractor;
///
/// let records = RegexExtractor::new().extract("ISIN: US1234567890 8.25% 12JU26");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].isin_no.as_deref(), Some("US1234567890"));
/// assert_eq!(records[0].coupon, Some(8.25));
/// assert_eq!(records[0].maturity_date.as_deref(), Some("2026-06-12"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexExtractor {
    quantam_unit: QuantamUnit,
}

impl RegexExtractor {
    /// Create an extractor that keeps quantam digits as captured
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit applied to the captured quantam number
    pub fn with_quantam_unit(mut self, unit: QuantamUnit) -> Self {
        self.quantam_unit = unit;
        self
    }

    /// Extract a sequence holding exactly one record
    pub fn extract(&self, text: &str) -> Vec<BondRecord> {
        vec![self.extract_record(text)]
    }

    /// Extract a single record
    pub fn extract_record(&self, text: &str) -> BondRecord {
        BondRecord {
            isin_no: capture(&ISIN, text).map(str::to_string),
            issuer_name: capture(&ISSUER, text).map(str::to_string),
            coupon: capture(&COUPON, text).and_then(|c| c.parse().ok()),
            rating: None,
            tenor: None,
            quantam: self.quantam(text),
            ytm: None,
            business_sector: None,
            maturity_date: capture(&MATURITY, text).and_then(compact_date_to_iso),
        }
    }

    fn quantam(&self, text: &str) -> Option<i64> {
        let raw: i64 = capture(&QUANTAM, text)?.parse().ok()?;
        match self.quantam_unit {
            QuantamUnit::Raw => Some(raw),
            QuantamUnit::Lakh => raw.checked_mul(LAKH),
        }
    }
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Convert a compact `ddMMyy` token such as `12JU26` into `2026-06-12`
///
/// Unknown month codes become `01`; the year is always taken as `20yy`.
/// Returns `None` for tokens that are not six ASCII characters.
pub fn compact_date_to_iso(token: &str) -> Option<String> {
    if token.len() != 6 || !token.is_ascii() {
        return None;
    }
    let day = token.get(0..2)?;
    let month = month_number(token.get(2..4)?);
    let year = token.get(4..6)?;
    Some(format!("20{}-{}-{}", year, month, day))
}
