//! Schema module - the authoritative bond field list
//!
//! Both extraction paths are driven from this table: the LLM prompt renders
//! each field's [`BondField::prompt_hint`], and the regex fallback uses the
//! [`BondField::pattern`] hints. Keeping them in one place stops the two paths
//! from drifting apart.

/// Multiplier for amounts quoted in Lakh ("L", "Lac", "Lakh")
pub const LAKH: i64 = 100_000;

/// Business sectors the LLM is asked to pick from
///
/// Not enforced: any string is accepted in a [`crate::BondRecord`].
pub const BUSINESS_SECTORS: [&str; 9] = [
    "NBFC",
    "MFI",
    "OTHERS",
    "STATE GUARANTEED",
    "BANKING",
    "PSU",
    "HFC",
    "INVIT",
    "SME",
];

/// Two-letter month codes used in compact maturity dates such as `12JU26`
pub const MONTH_CODES: [(&str, &str); 12] = [
    ("JA", "01"),
    ("FE", "02"),
    ("MR", "03"),
    ("AP", "04"),
    ("MY", "05"),
    ("JU", "06"),
    ("JL", "07"),
    ("AU", "08"),
    ("SE", "09"),
    ("OC", "10"),
    ("NO", "11"),
    ("DE", "12"),
];

/// Look up the two-digit month for a compact month code
///
/// Unknown codes map to `"01"`.
///
/// # Examples
///
/// ```
/// use bondscribe_domain::schema::month_number;
///
/// assert_eq!(month_number("JU"), "06");
/// assert_eq!(month_number("XX"), "01");
/// ```
pub fn month_number(code: &str) -> &'static str {
    MONTH_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, m)| *m)
        .unwrap_or("01")
}

/// Value type of a bond field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Decimal number (percentages are unit-less)
    Decimal,
    /// Whole number
    Integer,
    /// ISO `yyyy-mm-dd` date string
    Date,
}

/// One of the nine fields of a [`crate::BondRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondField {
    /// 12-character ISIN
    IsinNo,
    /// Issuing company
    IssuerName,
    /// Coupon rate, percent
    Coupon,
    /// Credit rating label
    Rating,
    /// Duration in years
    Tenor,
    /// Notional amount in currency units
    Quantam,
    /// Yield to maturity, percent
    Ytm,
    /// Business sector of the issuer
    BusinessSector,
    /// Maturity date
    MaturityDate,
}

impl BondField {
    /// All fields, in wire order
    pub const ALL: [BondField; 9] = [
        BondField::IsinNo,
        BondField::IssuerName,
        BondField::Coupon,
        BondField::Rating,
        BondField::Tenor,
        BondField::Quantam,
        BondField::Ytm,
        BondField::BusinessSector,
        BondField::MaturityDate,
    ];

    /// JSON key of the field
    pub fn key(&self) -> &'static str {
        match self {
            BondField::IsinNo => "isinNo",
            BondField::IssuerName => "issuerName",
            BondField::Coupon => "coupon",
            BondField::Rating => "rating",
            BondField::Tenor => "tenor",
            BondField::Quantam => "quantam",
            BondField::Ytm => "ytm",
            BondField::BusinessSector => "business_sector",
            BondField::MaturityDate => "maturityDate",
        }
    }

    /// Value type of the field
    pub fn kind(&self) -> FieldKind {
        match self {
            BondField::IsinNo
            | BondField::IssuerName
            | BondField::Rating
            | BondField::BusinessSector => FieldKind::Text,
            BondField::Coupon | BondField::Ytm => FieldKind::Decimal,
            BondField::Tenor | BondField::Quantam => FieldKind::Integer,
            BondField::MaturityDate => FieldKind::Date,
        }
    }

    /// Parse a field from its JSON key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Description rendered into the extraction prompt
    pub fn prompt_hint(&self) -> &'static str {
        match self {
            BondField::IsinNo => {
                "Unique 12-character alphanumeric string - e.g., 'US1234567890'"
            }
            BondField::IssuerName => "string",
            BondField::Coupon => "Number followed by %",
            BondField::Rating => "string",
            BondField::Tenor => "number of years",
            BondField::Quantam => {
                "Number in Lakh or Lac or L - e.g., 500000 for 5 Lakh/Lac/L, 5000000 for 50 Lakh/Lac/L"
            }
            BondField::Ytm => "Number followed by %",
            BondField::BusinessSector => {
                "Industry Name - Determine the sector this business operates in"
            }
            BondField::MaturityDate => "Format - yyyy-mm-dd",
        }
    }

    /// Regex used by the deterministic fallback, if the field has one
    ///
    /// Capture group 1 holds the value.
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            BondField::IsinNo => Some(r"(?:ISIN\s*:?\s*)?([A-Z]{2}[A-Z0-9]{9}\d)"),
            BondField::IssuerName => Some(r"([A-Z]+(?: [A-Z]+)*)"),
            BondField::Coupon => Some(r"(\d{1,2}\.\d{1,2})\s*(?:NCD|%)"),
            BondField::Quantam => Some(r"(\d+)\s*L"),
            BondField::MaturityDate => Some(r"(\d{2}[A-Z]{2}\d{2})"),
            BondField::Rating
            | BondField::Tenor
            | BondField::Ytm
            | BondField::BusinessSector => None,
        }
    }
}

impl std::fmt::Display for BondField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for field in BondField::ALL {
            assert_eq!(BondField::from_key(field.key()), Some(field));
        }
        assert_eq!(BondField::from_key("bid_offer"), None);
    }

    #[test]
    fn test_month_table() {
        assert_eq!(month_number("JA"), "01");
        assert_eq!(month_number("MR"), "03");
        assert_eq!(month_number("JL"), "07");
        assert_eq!(month_number("DE"), "12");
        assert_eq!(month_number("ja"), "01");
        assert_eq!(month_number("XX"), "01");
    }

    #[test]
    fn test_fields_without_fallback_pattern() {
        let unmatched: Vec<_> = BondField::ALL
            .iter()
            .filter(|f| f.pattern().is_none())
            .map(|f| f.key())
            .collect();
        assert_eq!(unmatched, vec!["rating", "tenor", "ytm", "business_sector"]);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(BondField::Coupon.kind(), FieldKind::Decimal);
        assert_eq!(BondField::Quantam.kind(), FieldKind::Integer);
        assert_eq!(BondField::MaturityDate.kind(), FieldKind::Date);
        assert_eq!(BondField::IssuerName.kind(), FieldKind::Text);
    }
}
