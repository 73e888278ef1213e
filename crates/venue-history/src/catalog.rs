//! Reference data loaded once at startup.
//!
//! The catalog and the request book are built explicitly from files and are
//! read-only afterwards; callers hold them by value or behind an `Arc` and
//! pass them to whatever needs them.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::document::VenueRecord;
use crate::error::HistoryError;
use crate::event::{EventRequest, HistoricalEvent};
use crate::HistoryResult;

fn read_json_array(path: &Path) -> HistoryResult<Vec<Value>> {
    let raw = std::fs::read_to_string(path).map_err(|source| HistoryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| HistoryError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Venue and client lookup tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    venues: HashMap<String, VenueRecord>,
    clients: HashMap<String, Value>,
}

impl ReferenceCatalog {
    /// Build a catalog from in-memory records.
    ///
    /// Venues without a `venue_id` and clients without a `client_id` are
    /// dropped. On duplicate ids the later record wins.
    pub fn from_records(venues: Vec<VenueRecord>, clients: Vec<Value>) -> Self {
        let venues = venues
            .into_iter()
            .filter_map(|venue| match venue.venue_id() {
                Some(id) => Some((id.to_string(), venue)),
                None => {
                    warn!("skipping venue without venue_id");
                    None
                }
            })
            .collect();

        let clients = clients
            .into_iter()
            .filter_map(|client| {
                let id = client.get("client_id")?.as_str()?.to_string();
                Some((id, client))
            })
            .collect();

        Self { venues, clients }
    }

    /// Load `venues.json` and `client_profiles.json` style arrays.
    pub fn load(venues_path: &Path, clients_path: &Path) -> HistoryResult<Self> {
        let venues = read_json_array(venues_path)?
            .into_iter()
            .map(VenueRecord::from_json)
            .collect::<HistoryResult<Vec<_>>>()?;
        let clients = read_json_array(clients_path)?;

        let catalog = Self::from_records(venues, clients);
        debug!(
            venues = catalog.venue_count(),
            clients = catalog.client_count(),
            "reference catalog loaded"
        );
        Ok(catalog)
    }

    pub fn venue(&self, venue_id: &str) -> Option<&VenueRecord> {
        self.venues.get(venue_id)
    }

    pub fn client(&self, client_id: &str) -> Option<&Value> {
        self.clients.get(client_id)
    }

    pub fn venue_count(&self) -> usize {
        self.venues.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

/// Pending event requests keyed by `event_id`.
#[derive(Debug, Clone, Default)]
pub struct RequestBook {
    requests: HashMap<String, EventRequest>,
}

impl RequestBook {
    pub fn from_requests(requests: Vec<EventRequest>) -> Self {
        let requests = requests
            .into_iter()
            .filter_map(|event| Some((event.event_id()?.to_string(), event)))
            .collect();
        Self { requests }
    }

    /// Load a `current_requests.json` style array.
    pub fn load(path: &Path) -> HistoryResult<Self> {
        let requests = read_json_array(path)?
            .into_iter()
            .map(EventRequest::from_json)
            .collect::<HistoryResult<Vec<_>>>()?;
        Ok(Self::from_requests(requests))
    }

    pub fn get(&self, event_id: &str) -> HistoryResult<&EventRequest> {
        self.requests
            .get(event_id)
            .ok_or_else(|| HistoryError::UnknownEvent(event_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Load an `event_history.json` style array.
pub fn load_history(path: &Path) -> HistoryResult<Vec<HistoricalEvent>> {
    read_json_array(path)?
        .into_iter()
        .map(HistoricalEvent::from_json)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_indexes_by_id_and_skips_anonymous_records() {
        let catalog = ReferenceCatalog::from_records(
            vec![
                VenueRecord::from_json(json!({"venue_id": "V1", "name": "Pier 9"})).unwrap(),
                VenueRecord::from_json(json!({"name": "Nameless"})).unwrap(),
            ],
            vec![json!({"client_id": "C1"}), json!({"name": "no id"})],
        );

        assert_eq!(catalog.venue_count(), 1);
        assert_eq!(catalog.client_count(), 1);
        assert_eq!(catalog.venue("V1").unwrap().name(), "Pier 9");
        assert!(catalog.client("C1").is_some());
        assert!(catalog.venue("V2").is_none());
    }

    #[test]
    fn test_request_book_reports_unknown_event() {
        let book = RequestBook::from_requests(vec![EventRequest::from_json(
            json!({"event_id": "EVT-2026-028"}),
        )
        .unwrap()]);

        assert!(book.get("EVT-2026-028").is_ok());
        let err = book.get("EVT-404").unwrap_err();
        assert!(matches!(err, HistoryError::UnknownEvent(id) if id == "EVT-404"));
    }
}
