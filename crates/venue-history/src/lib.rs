//! Venue-History: historical events, reference data and retrieval
//!
//! This crate is the retrieval collaborator of the recommendation service.
//! It turns a file of past events into [`RetrievedDocument`]s enriched with
//! venue and client records, and serves the most relevant ones for a new
//! [`EventRequest`].
//!
//! ## Key Components
//!
//! - [`ReferenceCatalog`]: immutable venue/client lookup tables, built once and injected
//! - [`RequestBook`]: pending event requests keyed by `event_id`
//! - [`indexing`]: document construction from historical events
//! - [`SearchFilter`] / [`build_query`]: request-derived retrieval constraints
//! - [`Retriever`] / [`MemoryRetriever`]: document search

mod catalog;
mod document;
mod error;
mod event;
pub mod indexing;
mod query;
mod retriever;

pub use catalog::{load_history, ReferenceCatalog, RequestBook};
pub use document::{
    document_venues, unique_venues, DocumentMetadata, RetrievedDocument, VenueRecord,
};
pub use error::HistoryError;
pub use event::{display_value, EventRequest, HistoricalEvent, RecordFields};
pub use query::{build_query, SearchFilter};
pub use retriever::{search_documents, MemoryRetriever, Retriever};

/// Result type for venue-history operations
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;
