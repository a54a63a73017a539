//! Chat message types exchanged with an LLM provider

use serde::{Deserialize, Serialize};

/// Role of a message in a chat conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model
    System,
    /// End-user input
    User,
    /// Model output from an earlier turn
    Assistant,
}

/// A role-tagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single completion call: ordered messages, model id, and sampling temperature
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Conversation, oldest first
    pub messages: Vec<ChatMessage>,
    /// Model identifier understood by the provider
    pub model: String,
    /// Sampling temperature; low values are near-deterministic
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a request
    pub fn new(messages: Vec<ChatMessage>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            messages,
            model: model.into(),
            temperature,
        }
    }

    /// Content of the last message, used by test doubles to route responses
    pub fn last_content(&self) -> &str {
        self.messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }
}
