//! Pull a JSON object out of raw LLM output

use crate::config::SchemaPolicy;
use crate::error::ExtractorError;
use crate::reconcile::reconcile;
use bondscribe_domain::BondRecord;
use serde_json::{Map, Value};
use tracing::debug;

/// Parse model output into a bond record using the lenient schema policy
///
/// See [`sanitize_with`].
pub fn sanitize(raw: &str) -> Result<BondRecord, ExtractorError> {
    sanitize_with(raw, SchemaPolicy::Lenient)
}

/// Parse model output into a bond record
///
/// Commentary, markdown fences or explanations around the payload are
/// ignored: everything from the first `{` to the last `}` is parsed.
///
/// # Errors
///
/// - [`ExtractorError::NoJsonFound`] when there is no `{ ... }` span
/// - [`ExtractorError::MalformedJson`] when the span does not parse
/// - [`ExtractorError::SchemaMismatch`] when `policy` is strict and the
///   object does not fit the schema
pub fn sanitize_with(raw: &str, policy: SchemaPolicy) -> Result<BondRecord, ExtractorError> {
    let object = extract_json_object(raw)?;
    reconcile(object, policy)
}

/// Locate and parse the outermost JSON object in `raw`, returning it as-is
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, ExtractorError> {
    let json_str = json_span(raw).ok_or(ExtractorError::NoJsonFound)?;
    debug!("Cleaned JSON string: {}", json_str);

    let object: Map<String, Value> = serde_json::from_str(json_str)?;
    Ok(object)
}

fn json_span(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end < start {
        return None;
    }
    trimmed.get(start..=end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_json() {
        let record = sanitize(r#"{"isinNo": "INE0ABC12345", "coupon": 9.5}"#).unwrap();
        assert_eq!(record.isin_no.as_deref(), Some("INE0ABC12345"));
        assert_eq!(record.coupon, Some(9.5));
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_sanitize_with_markdown_wrapper() {
        let response = r#"```json
{"issuerName": "ECL FINANCE LIMITED", "business_sector": "NBFC"}
```"#;
        let record = sanitize(response).unwrap();
        assert_eq!(record.issuer_name.as_deref(), Some("ECL FINANCE LIMITED"));
        assert_eq!(record.business_sector.as_deref(), Some("NBFC"));
    }

    #[test]
    fn test_sanitize_with_commentary() {
        let response = "Sure! Here is the data:\n{\"tenor\": 5}\nLet me know if you need more.";
        assert_eq!(sanitize(response).unwrap().tenor, Some(5));
    }

    #[test]
    fn test_no_json_found() {
        assert_eq!(sanitize("no json here"), Err(ExtractorError::NoJsonFound));
        assert_eq!(sanitize(""), Err(ExtractorError::NoJsonFound));
        assert_eq!(sanitize("only an opening {"), Err(ExtractorError::NoJsonFound));
        assert_eq!(sanitize("} backwards {"), Err(ExtractorError::NoJsonFound));
    }

    #[test]
    fn test_malformed_json() {
        let result = sanitize("{not: valid json}");
        assert!(matches!(result, Err(ExtractorError::MalformedJson(_))));
    }

    #[test]
    fn test_two_objects_span_is_malformed() {
        let result = sanitize(r#"{"coupon": 1.0} and {"coupon": 2.0}"#);
        assert!(matches!(result, Err(ExtractorError::MalformedJson(_))));
    }

    #[test]
    fn test_extract_json_object_keeps_unknown_keys() {
        let object = extract_json_object(r#"note {"bid_offer": 7.1, "coupon": null}"#).unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["bid_offer"], 7.1);
        assert!(object["coupon"].is_null());
    }

    #[test]
    fn test_nested_braces() {
        let object = extract_json_object(r#"{"a": {"b": 1}}"#).unwrap();
        assert_eq!(object["a"]["b"], 1);
    }

    #[test]
    fn test_strict_policy_rejects_partial_object() {
        let result = sanitize_with(r#"{"coupon": 9.5}"#, SchemaPolicy::Strict);
        assert!(matches!(result, Err(ExtractorError::SchemaMismatch(_))));
    }

    #[test]
    fn test_round_trip_keeps_edge_whitespace() {
        let record = BondRecord {
            issuer_name: Some("ECL FINANCE ".to_string()),
            rating: Some(" AA+".to_string()),
            ..BondRecord::default()
        };
        let wrapped = format!("note: {} end", serde_json::to_string(&record).unwrap());
        assert_eq!(sanitize(&wrapped).unwrap(), record);
    }

    #[test]
    fn test_round_trip_keeps_exact_floats() {
        let record = BondRecord {
            coupon: Some(14.463379272480811),
            ytm: Some(3.5092435806613254),
            ..BondRecord::default()
        };
        let wrapped = format!("```json\n{}\n```", serde_json::to_string(&record).unwrap());
        let parsed = sanitize(&wrapped).unwrap();
        assert_eq!(parsed.coupon.map(f64::to_bits), record.coupon.map(f64::to_bits));
        assert_eq!(parsed.ytm.map(f64::to_bits), record.ytm.map(f64::to_bits));
    }
}
