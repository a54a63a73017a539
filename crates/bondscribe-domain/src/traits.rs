//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::message::CompletionRequest;
use std::sync::Arc;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (bondscribe-llm). Calls block the
/// current thread until the provider answers or fails.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Run a chat completion and return the generated text
    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;
}

/// Shared providers, so one client can back both extraction and classification
impl<T: LlmProvider + ?Sized> LlmProvider for Arc<T> {
    type Error = T::Error;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        (**self).complete(request)
    }
}

impl<T: LlmProvider + ?Sized> LlmProvider for &T {
    type Error = T::Error;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        (**self).complete(request)
    }
}
