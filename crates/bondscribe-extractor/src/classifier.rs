//! Single-shot intent classification for chat messages

use bondscribe_domain::traits::LlmProvider;
use bondscribe_domain::{ChatMessage, CompletionRequest, IntentLabel};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{debug, warn};

/// Instruction text and label set the classifier runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstructionSet {
    /// Three-way: `BidRequest`, `OfferRequest`, `General`
    #[default]
    BidOffer,
    /// Two-way: `QuoteRequest`, `General`
    Quote,
}

impl InstructionSet {
    /// Labels the model is asked to choose from
    pub fn labels(&self) -> &'static [IntentLabel] {
        match self {
            InstructionSet::BidOffer => &[
                IntentLabel::BidRequest,
                IntentLabel::OfferRequest,
                IntentLabel::General,
            ],
            InstructionSet::Quote => &[IntentLabel::QuoteRequest, IntentLabel::General],
        }
    }

    /// System instruction sent ahead of the user message
    pub fn instructions(&self) -> &'static str {
        match self {
            InstructionSet::BidOffer => BID_OFFER_INSTRUCTIONS,
            InstructionSet::Quote => QUOTE_INSTRUCTIONS,
        }
    }

    /// Parse a set name (`bid-offer` or `quote`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bid-offer" | "bidoffer" | "bid_offer" => Some(InstructionSet::BidOffer),
            "quote" => Some(InstructionSet::Quote),
            _ => None,
        }
    }
}

impl std::str::FromStr for InstructionSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid instruction set: {}", s))
    }
}

/// Classifies a chat message by intent with one LLM call
///
/// There is no fallback: a failed call yields `None` and the caller decides
/// whether to retry.
pub struct IntentClassifier<L> {
    llm: L,
    instruction_set: InstructionSet,
    model: String,
    temperature: f32,
}

impl<L> IntentClassifier<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a classifier
    pub fn new(
        llm: L,
        instruction_set: InstructionSet,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            llm,
            instruction_set,
            model: model.into(),
            temperature,
        }
    }

    /// The configured instruction set
    pub fn instruction_set(&self) -> InstructionSet {
        self.instruction_set
    }

    /// Classify with the configured instruction set
    pub fn classify(&self, text: &str) -> Option<String> {
        self.classify_with(self.instruction_set, text)
    }

    /// Classify with an explicit instruction set
    ///
    /// Returns the trimmed model output verbatim. It is expected, not
    /// guaranteed, to be one of `instruction_set.labels()`.
    pub fn classify_with(&self, instruction_set: InstructionSet, text: &str) -> Option<String> {
        let request = CompletionRequest::new(
            vec![
                ChatMessage::system(instruction_set.instructions()),
                ChatMessage::user(text),
            ],
            self.model.clone(),
            self.temperature,
        );

        match self.llm.complete(&request) {
            Ok(response) => {
                let label = response.trim();
                if label.is_empty() {
                    warn!("Classification returned no content");
                    return None;
                }
                debug!("Classification: {}", label);
                Some(label.to_string())
            }
            Err(e) => {
                warn!("Error getting classification response: {}", e);
                None
            }
        }
    }

    /// Classify and parse the result into a label from the configured set
    pub fn classify_label(&self, text: &str) -> Option<IntentLabel> {
        let raw = self.classify(text)?;
        let label = IntentLabel::parse(&raw)
            .filter(|l| self.instruction_set.labels().contains(l));
        if label.is_none() {
            warn!("Model answered outside the label set: {}", raw);
        }
        label
    }
}

const BID_OFFER_INSTRUCTIONS: &str = r#"Instruction: You are a supervisor managing chat messages related to Fixed Income instruments. Your task is to classify each message based on intent and not based on some word in the message, ensuring accurate routing.

There are three possible categories:

    BidRequest – The user is looking to buy or is asking for a bid price.
        Examples:
            "Any offers for XYZ bond?"
            "Looking to buy XYZ, any sellers?"
            "What's your offer on XYZ?"
            "Need offers XYZ, what's available?"
            "What's the lowest ask?"
            "let me know what's on offer."
            "Anyone selling XYZ bonds? Looking at 5.5% yield."

    OfferRequest – The user is looking to sell or is asking for an offer price.
        Examples:
            "Selling XYZ bond, any bid?"
            "Any takers for XYZ at 5.2% yield?"
            "available at 4.8% yield, any takers?"
            "Looking to sell AAA-rated bonds, send your bids."
            "treasury bonds, who wants in?"
            "Offloading XYZ, who's interested?"

    General – If the intent is unclear, classify as "General" instead of making assumptions.

Respond with only one word: "BidRequest", "OfferRequest", or "General""#;

const QUOTE_INSTRUCTIONS: &str = r#"Instruction: You are a supervisor managing chat messages related to Fixed Income instruments. Your task is to classify each message based on intent and not based on some word in the message, ensuring accurate routing.

There are two possible categories:

    QuoteRequest – The user wants a price: a bid, an offer, or a two-way quote on an instrument.
        Examples:
            "Any offers for XYZ bond?"
            "Selling XYZ bond, any bid?"
            "What's your quote on XYZ?"
            "Looking to buy XYZ, any sellers?"
            "available at 4.8% yield, any takers?"

    General – Anything else, or if the intent is unclear. Do not make assumptions.

Respond with only one word: "QuoteRequest" or "General""#;

#[cfg(test)]
mod tests {
    use super::*;
    use bondscribe_domain::Role;
    use bondscribe_llm::MockProvider;

    fn classifier(llm: MockProvider, set: InstructionSet) -> IntentClassifier<MockProvider> {
        IntentClassifier::new(llm, set, "test-model", 0.3)
    }

    #[test]
    fn test_fixed_stub_is_returned_for_any_text() {
        let classifier = classifier(MockProvider::new("General"), InstructionSet::BidOffer);
        for text in ["", "Any offers for XYZ?", "Selling XYZ", "🙂 random"] {
            assert_eq!(classifier.classify(text).as_deref(), Some("General"));
        }
    }

    #[test]
    fn test_response_is_trimmed_not_validated() {
        let classifier = classifier(MockProvider::new("  Maybe\n"), InstructionSet::BidOffer);
        assert_eq!(classifier.classify("hm").as_deref(), Some("Maybe"));
        assert_eq!(classifier.classify_label("hm"), None);
    }

    #[test]
    fn test_failure_yields_none() {
        let classifier = classifier(MockProvider::failing(), InstructionSet::BidOffer);
        assert_eq!(classifier.classify("Selling XYZ"), None);
    }

    #[test]
    fn test_blank_response_yields_none() {
        let classifier = classifier(MockProvider::new("   "), InstructionSet::Quote);
        assert_eq!(classifier.classify("Selling XYZ"), None);
    }

    #[test]
    fn test_two_message_conversation() {
        let llm = MockProvider::new("BidRequest");
        let classifier = classifier(llm.clone(), InstructionSet::BidOffer);
        classifier.classify("Looking to buy XYZ");

        let request = llm.last_request().unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, BID_OFFER_INSTRUCTIONS);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Looking to buy XYZ");
        assert_eq!(request.model, "test-model");
        assert_eq!(request.temperature, 0.3);
    }

    #[test]
    fn test_classify_with_overrides_set() {
        let llm = MockProvider::new("QuoteRequest");
        let classifier = classifier(llm.clone(), InstructionSet::BidOffer);
        classifier.classify_with(InstructionSet::Quote, "price on XYZ?");
        let request = llm.last_request().unwrap();
        assert_eq!(request.messages[0].content, QUOTE_INSTRUCTIONS);
    }

    #[test]
    fn test_classify_label_respects_set() {
        let quote = classifier(MockProvider::new("QuoteRequest"), InstructionSet::Quote);
        assert_eq!(quote.classify_label("price?"), Some(IntentLabel::QuoteRequest));

        let bid_offer = classifier(MockProvider::new("QuoteRequest"), InstructionSet::BidOffer);
        assert_eq!(bid_offer.classify_label("price?"), None);

        let general = classifier(MockProvider::new("\"general\""), InstructionSet::BidOffer);
        assert_eq!(general.classify_label("hi"), Some(IntentLabel::General));
    }

    #[test]
    fn test_instruction_sets() {
        assert_eq!(InstructionSet::BidOffer.labels().len(), 3);
        assert_eq!(InstructionSet::Quote.labels().len(), 2);
        for set in [InstructionSet::BidOffer, InstructionSet::Quote] {
            for label in set.labels() {
                assert!(set.instructions().contains(label.as_str()));
            }
        }
        assert_eq!("quote".parse::<InstructionSet>(), Ok(InstructionSet::Quote));
        assert_eq!(InstructionSet::parse("BID-OFFER"), Some(InstructionSet::BidOffer));
        assert!("other".parse::<InstructionSet>().is_err());
    }
}
