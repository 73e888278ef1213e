//! Document retrieval.
//!
//! [`Retriever`] is the seam to a search backend. [`MemoryRetriever`] keeps
//! the documents in memory and ranks them by term overlap with the query,
//! which is enough for local runs and tests.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::document::RetrievedDocument;
use crate::event::EventRequest;
use crate::query::{build_query, SearchFilter};
use crate::HistoryResult;

/// A searchable store of historical documents.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Up to `k` documents passing `filter`, most relevant first.
    async fn search(
        &self,
        query: &str,
        filter: &SearchFilter,
        k: usize,
    ) -> HistoryResult<Vec<RetrievedDocument>>;
}

/// Search for documents similar to `event`.
///
/// Backend failures are logged and yield no documents.
pub async fn search_documents(
    retriever: &dyn Retriever,
    event: &EventRequest,
    k: usize,
) -> Vec<RetrievedDocument> {
    let query = build_query(event);
    let filter = SearchFilter::from_event(event);

    match retriever.search(&query, &filter, k).await {
        Ok(documents) => {
            debug!(retrieved = documents.len(), k, "document search finished");
            documents
        }
        Err(e) => {
            error!(error = %e, "error searching documents");
            Vec::new()
        }
    }
}

fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 2)
        .map(str::to_lowercase)
        .collect()
}

/// In-memory retriever ranking by shared query terms.
#[derive(Debug, Clone, Default)]
pub struct MemoryRetriever {
    documents: Vec<RetrievedDocument>,
}

impl MemoryRetriever {
    pub fn new(documents: Vec<RetrievedDocument>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl Retriever for MemoryRetriever {
    async fn search(
        &self,
        query: &str,
        filter: &SearchFilter,
        k: usize,
    ) -> HistoryResult<Vec<RetrievedDocument>> {
        let query_terms = terms(query);

        let mut scored: Vec<(usize, &RetrievedDocument)> = self
            .documents
            .iter()
            .filter(|doc| filter.matches(&doc.metadata))
            .map(|doc| (terms(&doc.content).intersection(&query_terms).count(), doc))
            .collect();

        // stable: ties keep insertion order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}
