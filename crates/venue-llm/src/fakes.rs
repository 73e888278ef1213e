//! In-memory chat model fake (testing only)
//!
//! `ScriptedChatModel` replays a queue of canned replies and records every
//! request it receives, so callers can assert on the prompts they built.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::{ChatModel, ChatRequest, LlmResult};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(String),
}

/// Chat model that answers from a script.
///
/// When the script runs dry the fallback reply (if any) is repeated;
/// without a fallback every further call fails.
#[derive(Debug, Default)]
pub struct ScriptedChatModel {
    script: Mutex<VecDeque<Reply>>,
    fallback: Option<Reply>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            fallback: Some(Reply::Text(text.into())),
            ..Self::default()
        }
    }

    /// Always fail with `reason`.
    pub fn always_failing(reason: impl Into<String>) -> Self {
        Self {
            fallback: Some(Reply::Failure(reason.into())),
            ..Self::default()
        }
    }

    /// Queue a successful reply.
    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.push(Reply::Text(text.into()));
        self
    }

    /// Queue a failure.
    pub fn then_fail(self, reason: impl Into<String>) -> Self {
        self.push(Reply::Failure(reason.into()));
        self
    }

    fn push(&self, reply: Reply) {
        self.script.lock().unwrap().push_back(reply);
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &ChatRequest) -> LlmResult<String> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone());

        match next {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Failure(reason)) => Err(LlmError::Scripted(reason)),
            None => Err(LlmError::Scripted("script exhausted".to_string())),
        }
    }
}
