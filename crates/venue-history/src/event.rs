//! Event records.
//!
//! Requests and historical events are open-ended JSON objects. The
//! recommendation core forwards them untouched; the typed accessors on
//! [`RecordFields`] exist for prompt and query formatting only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HistoryError;
use crate::HistoryResult;

/// Read access shared by every JSON-object record.
pub trait RecordFields {
    fn fields(&self) -> &Map<String, Value>;

    fn get(&self, key: &str) -> Option<&Value> {
        self.fields().get(key).filter(|v| !v.is_null())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn u64_field(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        })
    }

    fn f64_field(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    fn bool_field(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// String items of an array field; non-string items are rendered as JSON.
    fn str_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().map(display_value).collect(),
            _ => Vec::new(),
        }
    }

    /// Field rendered as plain text, empty when absent.
    fn text(&self, key: &str) -> String {
        self.get(key).map(display_value).unwrap_or_default()
    }
}

/// Render a JSON value the way it should read inside a prompt.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn into_object(value: Value, what: &str) -> HistoryResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(HistoryError::InvalidRecord(format!(
            "{what} must be a JSON object, got {other}"
        ))),
    }
}

/// A pending request for venue recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRequest(Map<String, Value>);

impl EventRequest {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_json(value: Value) -> HistoryResult<Self> {
        into_object(value, "event request").map(Self)
    }

    pub fn event_id(&self) -> Option<&str> {
        self.str_field("event_id")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl RecordFields for EventRequest {
    fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A past event, as stored in the event history file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalEvent(Map<String, Value>);

impl HistoricalEvent {
    pub fn from_json(value: Value) -> HistoryResult<Self> {
        into_object(value, "historical event").map(Self)
    }

    pub fn venue_id(&self) -> Option<&str> {
        self.str_field("venue_id")
    }

    pub fn client_id(&self) -> Option<&str> {
        self.str_field("client_id")
    }
}

impl RecordFields for HistoricalEvent {
    fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_request_rejects_non_object() {
        let err = EventRequest::from_json(json!([1, 2, 3])).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn test_accessors_treat_null_as_absent() {
        let event = EventRequest::from_json(json!({
            "event_id": "EVT-1",
            "budget": null,
            "attendee_count": 120,
            "required_amenities": ["wifi", "projector"],
        }))
        .unwrap();

        assert_eq!(event.event_id(), Some("EVT-1"));
        assert!(event.get("budget").is_none());
        assert_eq!(event.text("budget"), "");
        assert_eq!(event.u64_field("attendee_count"), Some(120));
        assert_eq!(event.str_list("required_amenities"), vec!["wifi", "projector"]);
        assert!(event.str_list("missing").is_empty());
    }

    #[test]
    fn test_u64_field_accepts_whole_floats() {
        let event = EventRequest::from_json(json!({ "budget": 50000.0 })).unwrap();
        assert_eq!(event.u64_field("budget"), Some(50000));
    }

    #[test]
    fn test_event_request_serializes_transparently() {
        let raw = json!({ "attendee_count": 100, "budget": 50000 });
        let event = EventRequest::from_json(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&event).unwrap(), raw);
    }
}
