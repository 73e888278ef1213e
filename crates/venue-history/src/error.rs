//! Error types for venue-history

use thiserror::Error;

/// Errors that can occur while loading or searching historical data
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Reading a data file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A data file is not the expected JSON shape
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record that must be a JSON object was something else
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The requested event is not in the request book
    #[error("event not in current requests: {0}")]
    UnknownEvent(String),

    /// The retrieval backend failed
    #[error("search failed: {0}")]
    Search(String),
}
