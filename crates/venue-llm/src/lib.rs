//! Venue-LLM: chat-completion access for the venue analysis agents
//!
//! This crate is the language-model collaborator of the recommendation
//! service. Agents hand it a system prompt and a user prompt and get back raw
//! completion text, which [`parse_structured`] turns into typed output.
//!
//! ## Key Components
//!
//! - [`ChatModel`]: the seam every agent depends on
//! - [`OpenAiChatClient`]: `/chat/completions` client for OpenAI-compatible APIs
//! - [`parse_structured`]: JSON extraction from completion text
//! - [`fakes::ScriptedChatModel`]: deterministic stand-in for tests

mod client;
mod error;
pub mod fakes;
mod structured;

use async_trait::async_trait;

pub use client::{LlmConfig, OpenAiChatClient};
pub use error::LlmError;
pub use structured::{extract_json, parse_structured};

/// Result type for venue-llm operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// A single system + user exchange sent to a chat model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
}

impl ChatRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Anything that can turn a [`ChatRequest`] into completion text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, used in logs.
    fn model_name(&self) -> &str;

    /// Run one completion and return the assistant message content.
    async fn complete(&self, request: &ChatRequest) -> LlmResult<String>;
}
