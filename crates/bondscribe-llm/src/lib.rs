//! Bondscribe LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `bondscribe-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GroqProvider`: OpenAI-compatible chat completions (Groq by default)
//!
//! # Examples
//!
//! ```
//! use bondscribe_llm::MockProvider;
//! use bondscribe_domain::traits::LlmProvider;
//! use bondscribe_domain::{ChatMessage, CompletionRequest};
//!
//! let provider = MockProvider::new("General");
//! let request = CompletionRequest::new(vec![ChatMessage::user("hi")], "any-model", 0.3);
//! assert_eq!(provider.complete(&request).unwrap(), "General");
//! ```

#![warn(missing_docs)]

pub mod groq;

use bondscribe_domain::traits::LlmProvider as LlmProviderTrait;
use bondscribe_domain::CompletionRequest;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use groq::GroqProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Credential missing or rejected; fatal, never retried
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider answered without any message content
    #[error("Empty response from model")]
    EmptyResponse,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// True for credential failures, which callers treat as fatal
    pub fn is_authentication(&self) -> bool {
        matches!(self, LlmError::Authentication(_))
    }

    /// True for failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Communication(_) | LlmError::RateLimitExceeded)
    }
}

#[derive(Debug, Clone)]
enum MockResponse {
    Text(String),
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls. Keyed
/// responses match when the last message of the request contains the key;
/// the first registered match wins.
///
/// # Examples
///
/// ```
/// use bondscribe_llm::MockProvider;
/// use bondscribe_domain::traits::LlmProvider;
/// use bondscribe_domain::{ChatMessage, CompletionRequest};
///
/// let mut provider = MockProvider::default();
/// provider.add_response("selling", "OfferRequest");
///
/// let request = CompletionRequest::new(
///     vec![ChatMessage::system("classify"), ChatMessage::user("selling XYZ")],
///     "m",
///     0.3,
/// );
/// assert_eq!(provider.complete(&request).unwrap(), "OfferRequest");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: MockResponse,
    responses: Arc<Mutex<Vec<(String, MockResponse)>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockResponse::Text(response.into()))
    }

    /// Create a MockProvider whose every call fails
    pub fn failing() -> Self {
        Self::with_default(MockResponse::Error)
    }

    fn with_default(default_response: MockResponse) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a response for requests whose last message contains `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((key.into(), MockResponse::Text(response.into())));
    }

    /// Configure to return an error for requests whose last message contains `key`
    pub fn add_error(&mut self, key: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((key.into(), MockResponse::Error));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// The most recent request seen by this provider
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        let content = request.last_content();
        let responses = self.responses.lock().unwrap();
        let response = responses
            .iter()
            .find(|(key, _)| content.contains(key.as_str()))
            .map(|(_, response)| response)
            .unwrap_or(&self.default_response);

        match response {
            MockResponse::Text(text) => Ok(text.clone()),
            MockResponse::Error => Err(LlmError::Other("Mock error".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondscribe_domain::ChatMessage;

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest::new(vec![ChatMessage::user(content)], "test-model", 0.3)
    }

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete(&request("any prompt"));
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete(&request("say hello")).unwrap(), "world");
        assert_eq!(provider.complete(&request("foo")).unwrap(), "bar");
        assert_eq!(
            provider.complete(&request("unknown")).unwrap(),
            "Default mock response"
        );
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.complete(&request("prompt1")).unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.complete(&request("prompt2")).unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.complete(&request("bad prompt"));
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_mock_provider_failing() {
        let provider = MockProvider::failing();
        assert!(provider.complete(&request("anything")).is_err());
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_provider_records_last_request() {
        let provider = MockProvider::new("ok");
        assert!(provider.last_request().is_none());

        provider.complete(&request("first")).unwrap();
        provider.complete(&request("second")).unwrap();

        let last = provider.last_request().unwrap();
        assert_eq!(last.last_content(), "second");
        assert_eq!(last.model, "test-model");
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete(&request("test")).unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_error_classification() {
        assert!(LlmError::Authentication("no key".into()).is_authentication());
        assert!(!LlmError::EmptyResponse.is_authentication());
        assert!(LlmError::RateLimitExceeded.is_retryable());
        assert!(LlmError::Communication("reset".into()).is_retryable());
        assert!(!LlmError::ModelNotAvailable("m".into()).is_retryable());
    }
}
