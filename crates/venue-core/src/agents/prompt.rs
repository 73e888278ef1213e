//! Prompt text shared by the LLM-backed agents.

use serde_json::Value;
use venue_history::{display_value, RecordFields, RetrievedDocument};

pub(crate) const NO_SIMILAR_EVENTS: &str = "No similar events found in history.";

/// Retrieved documents as numbered "Similar Event" blocks.
///
/// `limit` caps how many documents are shown.
pub(crate) fn similar_events(documents: &[RetrievedDocument], limit: Option<usize>) -> String {
    if documents.is_empty() {
        return NO_SIMILAR_EVENTS.to_string();
    }

    documents
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(i, doc)| format!("Similar Event {}:\n{}\n", i + 1, doc.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-venue blocks separated by blank lines.
pub(crate) fn venue_blocks(blocks: Vec<String>) -> String {
    blocks.join("\n\n")
}

/// Comma-joined list, or `fallback` when empty.
pub(crate) fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// `1234567` → `1,234,567`.
pub(crate) fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Numeric field rendered with thousands separators; 0 when absent.
///
/// Fractional amounts keep two decimals.
pub(crate) fn grouped(record: &impl RecordFields, key: &str) -> String {
    match record.get(key) {
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(whole), _) => thousands(whole),
            (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 => thousands(f as u64),
            (None, Some(f)) if f >= 0.0 => {
                let cents = (f * 100.0).round() as u64;
                format!("{}.{:02}", thousands(cents / 100), cents % 100)
            }
            _ => n.to_string(),
        },
        Some(other) => display_value(other),
        None => "0".to_string(),
    }
}

/// Dollar amount, e.g. `$25,000`.
pub(crate) fn money(record: &impl RecordFields, key: &str) -> String {
    format!("${}", grouped(record, key))
}

/// Field as text, or `fallback` when absent.
pub(crate) fn text_or(record: &impl RecordFields, key: &str, fallback: &str) -> String {
    record
        .get(key)
        .map(display_value)
        .unwrap_or_else(|| fallback.to_string())
}

/// Python-style boolean display used throughout the prompts.
pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
