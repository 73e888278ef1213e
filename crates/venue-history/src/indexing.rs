//! Document construction from the event history.
//!
//! Each historical event becomes one [`RetrievedDocument`]: a composite text
//! describing the event/venue match, plus metadata holding an event summary,
//! the client profile and the venue record from the [`ReferenceCatalog`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::ReferenceCatalog;
use crate::document::{DocumentMetadata, RetrievedDocument};
use crate::event::{HistoricalEvent, RecordFields};

/// Event fields copied into document metadata.
const EVENT_METADATA_FIELDS: &[&str] = &[
    "event_id",
    "event_name",
    "event_type",
    "client_name",
    "key_requirements",
    "success_factors",
    "challenges",
    "duration_days",
    "event_dates",
    "venue_id",
    "city",
    "total_cost",
    "venue_cost",
    "other_costs",
    "budget_met",
    "event_style",
    "requirements_met",
    "client_rating",
    "venue_rating",
    "average_rating",
    "overall_satisfaction",
    "would_recommend",
    "would_rebook",
    "rebooking_likelihood",
];

/// Composite text capturing the event/venue match pattern.
pub fn event_embedding_text(event: &HistoricalEvent) -> String {
    let lines = [
        ("Event ID", event.text("event_id")),
        ("Event Name", event.text("event_name")),
        ("Event Type", event.text("event_type")),
        ("Attendee Count", event.text("attendee_count")),
        ("Client Name", event.text("client_name")),
        ("Venue ID", event.text("venue_id")),
        ("Venue Name", event.text("venue_name")),
        ("Venue City", event.text("city")),
        ("Key Requirements", event.str_list("key_requirements").join(", ")),
        ("Requirements Met", event.text("requirements_met")),
        ("Success Factors", event.str_list("success_factors").join(", ")),
        ("Challenges", event.str_list("challenges").join(", ")),
        ("Positive Feedback", event.str_list("positive_feedback").join("; ")),
        ("Negative Feedback", event.str_list("negative_feedback").join("; ")),
        ("Notes", event.text("notes")),
        ("Outcome", event.text("outcome")),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Event summary stored in metadata. Absent and null fields are dropped.
pub fn event_metadata(event: &HistoricalEvent, indexed_at: DateTime<Utc>) -> Value {
    let mut summary: Map<String, Value> = EVENT_METADATA_FIELDS
        .iter()
        .filter_map(|key| Some((key.to_string(), event.get(key)?.clone())))
        .collect();
    summary.insert(
        "indexed_at".to_string(),
        Value::String(indexed_at.to_rfc3339()),
    );
    Value::Object(summary)
}

/// Metadata for one historical event. Missing catalog entries stay `None`.
pub fn document_metadata(
    event: &HistoricalEvent,
    catalog: &ReferenceCatalog,
    indexed_at: DateTime<Utc>,
) -> DocumentMetadata {
    DocumentMetadata {
        event: Some(event_metadata(event, indexed_at)),
        client: event
            .client_id()
            .and_then(|id| catalog.client(id))
            .cloned(),
        venue: event.venue_id().and_then(|id| catalog.venue(id)).cloned(),
    }
}

/// Build one document per historical event, in history order.
pub fn build_documents(
    history: &[HistoricalEvent],
    catalog: &ReferenceCatalog,
) -> Vec<RetrievedDocument> {
    let indexed_at = Utc::now();
    let documents: Vec<_> = history
        .iter()
        .map(|event| {
            RetrievedDocument::new(
                event_embedding_text(event),
                document_metadata(event, catalog, indexed_at),
            )
        })
        .collect();

    info!(total_documents = documents.len(), "built history documents");
    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::VenueRecord;
    use serde_json::json;

    fn history_event() -> HistoricalEvent {
        HistoricalEvent::from_json(json!({
            "event_id": "EVT-2024-001",
            "event_name": "Spring Summit",
            "attendee_count": 220,
            "venue_id": "V1",
            "client_id": "C9",
            "key_requirements": ["breakout rooms", "hybrid AV"],
            "positive_feedback": ["great food", "easy parking"],
            "budget_met": true,
            "venue_rating": null,
        }))
        .unwrap()
    }

    #[test]
    fn test_embedding_text_joins_lists() {
        let text = event_embedding_text(&history_event());
        assert!(text.contains("Event ID: EVT-2024-001"));
        assert!(text.contains("Attendee Count: 220"));
        assert!(text.contains("Key Requirements: breakout rooms, hybrid AV"));
        assert!(text.contains("Positive Feedback: great food; easy parking"));
        assert!(text.contains("\nNotes: \n"), "missing notes render empty");
    }

    #[test]
    fn test_event_metadata_drops_nulls_and_stamps_index_time() {
        let meta = event_metadata(&history_event(), Utc::now());
        assert_eq!(meta["event_id"], "EVT-2024-001");
        assert_eq!(meta["budget_met"], true);
        assert!(meta.get("venue_rating").is_none());
        assert!(meta.get("positive_feedback").is_none());
        assert!(meta["indexed_at"].is_string());
    }

    #[test]
    fn test_documents_link_catalog_records() {
        let catalog = ReferenceCatalog::from_records(
            vec![VenueRecord::from_json(json!({"venue_id": "V1", "name": "Pier 9"})).unwrap()],
            vec![],
        );
        let docs = build_documents(&[history_event()], &catalog);

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].venue().unwrap().name(), "Pier 9");
        assert!(docs[0].metadata.client.is_none(), "C9 is not in the catalog");
    }
}
