//! Bond record - the structured output of every extraction

use crate::schema::BondField;
use serde::{Deserialize, Serialize};

/// Structured representation of one fixed-income instrument mention
///
/// Every field is independently nullable. Serialization always emits all nine
/// keys, writing `null` for absent values, so consumers can rely on the shape.
///
/// # Examples
///
/// ```
/// use bondscribe_domain::BondRecord;
///
/// let record = BondRecord::empty();
/// assert!(record.is_empty());
/// assert_eq!(BondRecord::KEY_COUNT, 9);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// 12-character ISIN
    #[serde(rename = "isinNo", default)]
    pub isin_no: Option<String>,

    /// Issuing company
    #[serde(rename = "issuerName", default)]
    pub issuer_name: Option<String>,

    /// Coupon rate, percent
    #[serde(default)]
    pub coupon: Option<f64>,

    /// Credit rating label
    #[serde(default)]
    pub rating: Option<String>,

    /// Duration in years
    #[serde(default)]
    pub tenor: Option<i64>,

    /// Notional amount in currency units
    #[serde(default)]
    pub quantam: Option<i64>,

    /// Yield to maturity, percent
    #[serde(default)]
    pub ytm: Option<f64>,

    /// Business sector (NBFC, PSU, ...)
    #[serde(default)]
    pub business_sector: Option<String>,

    /// Maturity date as `yyyy-mm-dd`
    #[serde(rename = "maturityDate", default)]
    pub maturity_date: Option<String>,
}

impl BondRecord {
    /// Number of keys a serialized record carries
    pub const KEY_COUNT: usize = BondField::ALL.len();

    /// A record with every field null
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.populated_fields().is_empty()
    }

    /// Fields that carry a value, in wire order
    pub fn populated_fields(&self) -> Vec<BondField> {
        BondField::ALL
            .iter()
            .copied()
            .filter(|f| self.has(*f))
            .collect()
    }

    /// Whether the given field carries a value
    pub fn has(&self, field: BondField) -> bool {
        match field {
            BondField::IsinNo => self.isin_no.is_some(),
            BondField::IssuerName => self.issuer_name.is_some(),
            BondField::Coupon => self.coupon.is_some(),
            BondField::Rating => self.rating.is_some(),
            BondField::Tenor => self.tenor.is_some(),
            BondField::Quantam => self.quantam.is_some(),
            BondField::Ytm => self.ytm.is_some(),
            BondField::BusinessSector => self.business_sector.is_some(),
            BondField::MaturityDate => self.maturity_date.is_some(),
        }
    }

    /// Human-readable value of a field, `None` when null
    pub fn display_value(&self, field: BondField) -> Option<String> {
        match field {
            BondField::IsinNo => self.isin_no.clone(),
            BondField::IssuerName => self.issuer_name.clone(),
            BondField::Coupon => self.coupon.map(|v| v.to_string()),
            BondField::Rating => self.rating.clone(),
            BondField::Tenor => self.tenor.map(|v| v.to_string()),
            BondField::Quantam => self.quantam.map(|v| v.to_string()),
            BondField::Ytm => self.ytm.map(|v| v.to_string()),
            BondField::BusinessSector => self.business_sector.clone(),
            BondField::MaturityDate => self.maturity_date.clone(),
        }
    }
}
