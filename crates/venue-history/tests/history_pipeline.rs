//! File-backed load → index → search pipeline.

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use venue_history::indexing::build_documents;
use venue_history::{
    load_history, search_documents, HistoryError, MemoryRetriever, ReferenceCatalog, RequestBook,
};

fn write_json(dir: &TempDir, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
    path
}

fn fixture() -> (TempDir, PathBuf, PathBuf, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let venues = write_json(
        &dir,
        "venues.json",
        json!([
            {"venue_id": "V1", "name": "Riverside Center", "city": "Austin", "max_capacity": 120},
            {"venue_id": "V2", "name": "Grand Hall", "city": "Chicago", "max_capacity": 2000}
        ]),
    );
    let clients = write_json(
        &dir,
        "client_profiles.json",
        json!([{"client_id": "C1", "name": "Acme"}]),
    );
    let history = write_json(
        &dir,
        "event_history.json",
        json!([
            {"event_id": "H1", "event_type": "conference", "venue_id": "V1", "client_id": "C1",
             "key_requirements": ["breakout rooms"], "outcome": "success"},
            {"event_id": "H2", "event_type": "conference", "venue_id": "V2", "client_id": "C1"},
            {"event_id": "H3", "event_type": "gala", "venue_id": "V1"}
        ]),
    );
    let requests = write_json(
        &dir,
        "current_requests.json",
        json!([
            {"event_id": "EVT-2026-028", "event_type": "conference", "attendee_count": 100,
             "key_requirements": ["breakout rooms"]}
        ]),
    );
    (dir, venues, clients, history, requests)
}

#[tokio::test]
async fn test_requests_retrieve_documents_within_capacity_window() {
    let (_dir, venues, clients, history, requests) = fixture();

    let catalog = ReferenceCatalog::load(&venues, &clients).unwrap();
    let history = load_history(&history).unwrap();
    let book = RequestBook::load(&requests).unwrap();

    let documents = build_documents(&history, &catalog);
    assert_eq!(documents.len(), 3);
    assert!(documents[0].metadata.client.is_some());
    assert!(documents[2].metadata.client.is_none());

    let retriever = MemoryRetriever::new(documents);
    let event = book.get("EVT-2026-028").unwrap();
    let hits = search_documents(&retriever, event, 10).await;

    // V2 (capacity 2000) is outside 50..=150
    assert_eq!(hits.len(), 2);
    assert!(hits
        .iter()
        .all(|d| d.venue().and_then(|v| v.venue_id()) == Some("V1")));
    assert!(hits[0].content.contains("Event ID: H1"));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let err = load_history(&missing).unwrap_err();
    assert!(matches!(err, HistoryError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("venues.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = ReferenceCatalog::load(&path, &path).unwrap_err();
    assert!(matches!(err, HistoryError::Json { .. }));
}
