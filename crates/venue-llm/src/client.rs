//! OpenAI-compatible chat-completion client
//!
//! Talks to any endpoint exposing `POST {base_url}/chat/completions`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::{ChatModel, ChatRequest, LlmResult};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// API root, without the `/chat/completions` suffix
    pub base_url: String,
    /// Bearer token (optional for local gateways)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token ceiling
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: 6000,
        }
    }
}

impl LlmConfig {
    /// Defaults overridden by `VENUE_LLM_MODEL`, `VENUE_LLM_BASE_URL` and `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("VENUE_LLM_MODEL") {
            self.model = model;
        }
        if let Ok(base_url) = std::env::var("VENUE_LLM_BASE_URL") {
            self.base_url = base_url;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        self
    }

    /// Set the bearer token
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }
}

/// Chat client for OpenAI-compatible endpoints
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    config: LlmConfig,
    http_client: reqwest::Client,
}

impl OpenAiChatClient {
    /// Create a new client
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(LlmError::Config("base_url must not be empty".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("venue-llm/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(OpenAiChatClient {
            config,
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> LlmResult<Self> {
        Self::new(LlmConfig::from_env())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &ChatRequest) -> LlmResult<String> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let mut builder = self.http_client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        debug!(model = %self.config.model, "sending chat completion");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "chat completion rejected");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyCompletion)
    }
}
