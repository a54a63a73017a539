//! Bondscribe Domain Layer
//!
//! This crate holds the data contract shared by every other layer: the bond
//! record schema, intent labels, chat message types, and the trait seam for
//! LLM providers. It carries no behavior beyond small helpers on those types.
//!
//! ## Key Concepts
//!
//! - **BondRecord**: nine nullable fields describing one instrument mention
//! - **BondField**: the authoritative field list, with prompt and regex hints
//! - **IntentLabel**: routing tag produced by the classifier
//! - **LlmProvider**: blocking chat-completion capability
//!
//! ## Architecture
//!
//! - Only `serde` as an external dependency (for the wire format)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod intent;
pub mod message;
pub mod record;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use intent::IntentLabel;
pub use message::{ChatMessage, CompletionRequest, Role};
pub use record::BondRecord;
pub use schema::{BondField, FieldKind};
