//! Reconcile a parsed JSON object against the bond schema

use crate::config::SchemaPolicy;
use crate::error::ExtractorError;
use crate::fallback::compact_date_to_iso;
use bondscribe_domain::{BondField, BondRecord, FieldKind};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

/// Date layouts accepted from the model, tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Coerced value of one field
enum Coerced {
    Text(String),
    Decimal(f64),
    Integer(i64),
}

/// Build a [`BondRecord`] from a parsed object
///
/// Text values are kept verbatim. Lenient: missing keys become null, numeric strings (with or without `%`)
/// are parsed, dates are normalized to `yyyy-mm-dd`, and anything that cannot
/// be coerced becomes null. Strict: the first pass is the same, but a missing
/// key or an uncoercible value is collected as a problem and the whole object
/// is rejected. Unknown keys are dropped under both policies.
pub fn reconcile(
    mut object: Map<String, Value>,
    policy: SchemaPolicy,
) -> Result<BondRecord, ExtractorError> {
    let mut record = BondRecord::empty();
    let mut problems = Vec::new();

    for field in BondField::ALL {
        let Some(value) = object.remove(field.key()) else {
            problems.push(format!("missing '{}'", field.key()));
            continue;
        };
        if value.is_null() {
            continue;
        }
        match coerce(field.kind(), &value, policy) {
            Some(coerced) => assign(&mut record, field, coerced),
            None => problems.push(format!("'{}' has unusable value {}", field.key(), value)),
        }
    }

    if !object.is_empty() {
        let extra: Vec<&str> = object.keys().map(String::as_str).collect();
        debug!("Dropping unknown keys: {}", extra.join(", "));
    }

    match policy {
        SchemaPolicy::Strict if !problems.is_empty() => {
            Err(ExtractorError::SchemaMismatch(problems.join("; ")))
        }
        _ => {
            if !problems.is_empty() {
                debug!("Nulled fields during reconciliation: {}", problems.join("; "));
            }
            Ok(record)
        }
    }
}

fn coerce(kind: FieldKind, value: &Value, policy: SchemaPolicy) -> Option<Coerced> {
    let lenient = policy == SchemaPolicy::Lenient;
    match (kind, value) {
        (FieldKind::Text, Value::String(s)) => Some(Coerced::Text(s.clone())),
        (FieldKind::Text, Value::Number(n)) if lenient => Some(Coerced::Text(n.to_string())),

        (FieldKind::Decimal, Value::Number(n)) => n.as_f64().map(Coerced::Decimal),
        (FieldKind::Decimal, Value::String(s)) if lenient => {
            parse_decimal(s).map(Coerced::Decimal)
        }

        (FieldKind::Integer, Value::Number(n)) => integral(n).map(Coerced::Integer),
        (FieldKind::Integer, Value::String(s)) if lenient => {
            parse_integer(s).map(Coerced::Integer)
        }

        (FieldKind::Date, Value::String(s)) => normalize_date(s).map(Coerced::Text),

        _ => None,
    }
}

fn assign(record: &mut BondRecord, field: BondField, value: Coerced) {
    match (field, value) {
        (BondField::IsinNo, Coerced::Text(v)) => record.isin_no = Some(v),
        (BondField::IssuerName, Coerced::Text(v)) => record.issuer_name = Some(v),
        (BondField::Rating, Coerced::Text(v)) => record.rating = Some(v),
        (BondField::BusinessSector, Coerced::Text(v)) => record.business_sector = Some(v),
        (BondField::MaturityDate, Coerced::Text(v)) => record.maturity_date = Some(v),
        (BondField::Coupon, Coerced::Decimal(v)) => record.coupon = Some(v),
        (BondField::Ytm, Coerced::Decimal(v)) => record.ytm = Some(v),
        (BondField::Tenor, Coerced::Integer(v)) => record.tenor = Some(v),
        (BondField::Quantam, Coerced::Integer(v)) => record.quantam = Some(v),
        // coerce() is driven by field.kind(), so other pairings cannot occur
        _ => {}
    }
}

fn integral(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let cleaned = s.trim().trim_end_matches('%').trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_integer(s: &str) -> Option<i64> {
    let cleaned = s.trim().replace(',', "");
    cleaned.parse::<i64>().ok().or_else(|| {
        let f = cleaned.parse::<f64>().ok()?;
        (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
    })
}

/// Normalize a date string to `yyyy-mm-dd`
///
/// Accepts ISO, `dd/mm/yyyy`, `dd-mm-yyyy`, `dd.mm.yyyy` and the compact
/// `12JU26` form used in chat messages.
pub fn normalize_date(s: &str) -> Option<String> {
    let trimmed = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .or_else(|| is_compact_date(trimmed).then(|| compact_date_to_iso(trimmed)).flatten())
}

fn is_compact_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 6
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2..4].iter().all(u8::is_ascii_uppercase)
        && bytes[4..].iter().all(u8::is_ascii_digit)
}
