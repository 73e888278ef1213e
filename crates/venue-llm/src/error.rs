//! Error types for venue-llm

use thiserror::Error;

/// Errors that can occur while talking to a chat model
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered with a non-success status
    #[error("chat API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered without any choices
    #[error("chat API returned no completion")]
    EmptyCompletion,

    /// No JSON object could be located in the completion text
    #[error("no JSON object found in completion")]
    MissingJson,

    /// The completion JSON did not match the expected shape
    #[error("structured output parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Client could not be configured
    #[error("LLM client misconfigured: {0}")]
    Config(String),

    /// Scripted failure raised by a test double
    #[error("scripted failure: {0}")]
    Scripted(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Http(err.to_string())
    }
}
