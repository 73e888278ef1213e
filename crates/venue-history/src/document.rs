//! Retrieved documents and the venue records attached to them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HistoryError;
use crate::event::RecordFields;
use crate::HistoryResult;

/// A venue from the reference catalog, keyed by `venue_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueRecord(Map<String, Value>);

impl VenueRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn from_json(value: Value) -> HistoryResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(HistoryError::InvalidRecord(format!(
                "venue must be a JSON object, got {other}"
            ))),
        }
    }

    /// The stable identity of the venue; empty ids count as missing.
    pub fn venue_id(&self) -> Option<&str> {
        self.str_field("venue_id").filter(|id| !id.is_empty())
    }

    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or("Unknown")
    }
}

impl RecordFields for VenueRecord {
    fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Structured context attached to a retrieved document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(default)]
    pub venue: Option<VenueRecord>,
    #[serde(default)]
    pub client: Option<Value>,
    #[serde(default)]
    pub event: Option<Value>,
}

/// One historical event as returned by retrieval: free text plus metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl RetrievedDocument {
    pub fn new(content: impl Into<String>, metadata: DocumentMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    pub fn venue(&self) -> Option<&VenueRecord> {
        self.metadata.venue.as_ref()
    }
}

/// Venues referenced by `documents`, one per `venue_id`.
///
/// Keeps the first-seen record and first-seen order. Venues without an id
/// are skipped.
pub fn unique_venues(documents: &[RetrievedDocument]) -> Vec<VenueRecord> {
    let mut seen = HashSet::new();
    documents
        .iter()
        .filter_map(RetrievedDocument::venue)
        .filter(|venue| venue.venue_id().is_some_and(|id| seen.insert(id.to_string())))
        .cloned()
        .collect()
}

/// One venue per document that carries a venue, duplicates included.
pub fn document_venues(documents: &[RetrievedDocument]) -> Vec<VenueRecord> {
    documents
        .iter()
        .filter_map(RetrievedDocument::venue)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(content: &str, venue: Option<Value>) -> RetrievedDocument {
        RetrievedDocument::new(
            content,
            DocumentMetadata {
                venue: venue.map(|v| VenueRecord::from_json(v).unwrap()),
                ..DocumentMetadata::default()
            },
        )
    }

    #[test]
    fn test_unique_venues_keeps_first_seen_record_and_order() {
        let docs = vec![
            doc("a", Some(json!({"venue_id": "V2", "name": "Harbor Hall"}))),
            doc("b", Some(json!({"venue_id": "V1", "name": "First"}))),
            doc("c", Some(json!({"venue_id": "V1", "name": "Second"}))),
            doc("d", None),
        ];

        let venues = unique_venues(&docs);
        let ids: Vec<_> = venues.iter().filter_map(VenueRecord::venue_id).collect();
        assert_eq!(ids, vec!["V2", "V1"]);
        assert_eq!(venues[1].name(), "First");
    }

    #[test]
    fn test_unique_venues_skips_missing_or_empty_ids() {
        let docs = vec![
            doc("a", Some(json!({"name": "No Id"}))),
            doc("b", Some(json!({"venue_id": "", "name": "Blank"}))),
        ];
        assert!(unique_venues(&docs).is_empty());
        assert_eq!(document_venues(&docs).len(), 2);
    }

    #[test]
    fn test_document_venues_keeps_duplicates() {
        let docs = vec![
            doc("a", Some(json!({"venue_id": "V1"}))),
            doc("b", Some(json!({"venue_id": "V1"}))),
        ];
        assert_eq!(document_venues(&docs).len(), 2);
        assert_eq!(unique_venues(&docs).len(), 1);
    }

    #[test]
    fn test_metadata_fields_default_when_absent() {
        let parsed: RetrievedDocument =
            serde_json::from_value(json!({ "content": "text" })).unwrap();
        assert!(parsed.metadata.venue.is_none());
        assert!(parsed.metadata.client.is_none());
    }
}
