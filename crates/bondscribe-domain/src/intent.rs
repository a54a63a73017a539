//! Intent labels for chat message routing

/// Classification tag routing a chat message to a handling workflow
///
/// Which labels are in play depends on the instruction set the classifier
/// is configured with:
/// - bid/offer: `BidRequest`, `OfferRequest`, `General`
/// - quote: `QuoteRequest`, `General`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentLabel {
    /// The sender wants to buy, or asks for a bid price
    BidRequest,

    /// The sender wants to sell, or asks for an offer price
    OfferRequest,

    /// The sender asks for a quote
    QuoteRequest,

    /// Intent is unclear
    General,
}

impl IntentLabel {
    /// Get the label as it appears in model output
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::BidRequest => "BidRequest",
            IntentLabel::OfferRequest => "OfferRequest",
            IntentLabel::QuoteRequest => "QuoteRequest",
            IntentLabel::General => "General",
        }
    }

    /// Parse a label, ignoring case and surrounding quotes or punctuation
    pub fn parse(s: &str) -> Option<Self> {
        let cleaned = s.trim_matches(|c: char| {
            c.is_whitespace() || c == '"' || c == '\'' || c == '.' || c == '`'
        });
        match cleaned.to_lowercase().as_str() {
            "bidrequest" => Some(IntentLabel::BidRequest),
            "offerrequest" => Some(IntentLabel::OfferRequest),
            "quoterequest" => Some(IntentLabel::QuoteRequest),
            "general" => Some(IntentLabel::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IntentLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid intent label: {}", s))
    }
}
