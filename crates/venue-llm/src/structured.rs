//! Structured output extraction.
//!
//! Models are asked to answer with a single JSON object, but in practice they
//! wrap it in a fenced code block or surround it with prose. [`extract_json`]
//! locates the object; [`parse_structured`] deserializes it.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::LlmError;
use crate::LlmResult;

fn fence_pattern() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json|JSON)?\s*(\{.*?\})\s*```").expect("fence pattern compiles")
    })
}

/// Locate the JSON object inside a completion.
///
/// A fenced block wins; otherwise the span from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(captures) = fence_pattern().captures(text) {
        if let Some(body) = captures.get(1) {
            return Some(body.as_str());
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Deserialize the JSON object embedded in `text` into `T`.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> LlmResult<T> {
    let json = extract_json(text).ok_or(LlmError::MissingJson)?;
    Ok(serde_json::from_str(json)?)
}
