//! Groq Provider Implementation
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint; Groq's hosted
//! API is the default.
//!
//! # Features
//!
//! - Blocking HTTP communication, one request at a time
//! - Credential checked up front, HTTP client built lazily on first call
//! - Retry logic with exponential backoff for transient failures
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use bondscribe_llm::GroqProvider;
//!
//! let key = std::env::var("GROQ_API_KEY").ok();
//! let provider = GroqProvider::initialize(key.as_deref())?;
//! # Ok::<(), bondscribe_llm::LlmError>(())
//! ```

use crate::LlmError;
use bondscribe_domain::traits::LlmProvider as LlmProviderTrait;
use bondscribe_domain::{ChatMessage, CompletionRequest};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint (OpenAI-compatible base URL)
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Chat-completions provider for Groq and other OpenAI-compatible APIs
pub struct GroqProvider {
    endpoint: String,
    api_key: String,
    client: OnceCell<reqwest::blocking::Client>,
    max_retries: u32,
    timeout: Duration,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl GroqProvider {
    /// Create a provider against the default endpoint
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Authentication`] if the credential is absent or blank.
    /// No network call is made here; the HTTP client is built on first use.
    pub fn initialize(credential: Option<&str>) -> Result<Self, LlmError> {
        let api_key = credential
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LlmError::Authentication("API key not found".to_string()))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
            client: OnceCell::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Point the provider at another OpenAI-compatible base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts (at least one is always made)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn client(&self) -> Result<&reqwest::blocking::Client, LlmError> {
        self.client.get_or_try_init(|| {
            debug!("Building HTTP client for {}", self.endpoint);
            reqwest::blocking::Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| LlmError::Communication(format!("Failed to build client: {}", e)))
        })
    }

    /// Run a chat completion
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The credential is rejected (401/403)
    /// - The model is not available (404)
    /// - Network communication fails or the rate limit persists after retries
    /// - The response body is not a chat completion or has no content
    pub fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.send_once(&url, &body, &request.model) {
                Ok(content) => return Ok(content),
                Err(e) if e.is_retryable() => {
                    warn!("Attempt {} of {} failed: {}", attempts + 1, self.max_retries, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                std::thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    fn send_once(
        &self,
        url: &str,
        body: &ChatCompletionRequest<'_>,
        model: &str,
    ) -> Result<String, LlmError> {
        let response = self
            .client()?
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            let completion = response.json::<ChatCompletionResponse>().map_err(|e| {
                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;
            return completion
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
                .message
                .content
                .ok_or(LlmError::EmptyResponse);
        }

        let error_text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(status_error(status, error_text, model))
    }
}

fn status_error(status: StatusCode, error_text: String, model: &str) -> LlmError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LlmError::Authentication(format!("HTTP {}: {}", status, error_text))
        }
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        s if s.is_server_error() => {
            LlmError::Communication(format!("HTTP {}: {}", status, error_text))
        }
        _ => LlmError::Other(format!("HTTP {}: {}", status, error_text)),
    }
}

impl fmt::Debug for GroqProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqProvider")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("max_retries", &self.max_retries)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmProviderTrait for GroqProvider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.chat(request)
    }
}
