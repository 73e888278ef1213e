//! Synthesis role: ranks venues from the per-dimension analyses.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::FutureExt;
use tracing::instrument;
use venue_history::{EventRequest, RetrievedDocument};

use crate::domain::{AgentStatus, AnalysisKind, PartialAnalyses, RecommendationSet};
use crate::role_orchestration::error::{panic_detail, RoleError, RoleResult};

const ROLE_NAME: &str = "synthesis";

/// Everything the synthesizer sees.
///
/// A slot is the empty string when its dimension has no usable analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisInput<'a> {
    pub event: &'a EventRequest,
    pub capacity: String,
    pub amenity: String,
    pub location: String,
    pub cost: String,
    /// Retrieved document contents, in retrieval order, joined by newlines.
    pub historical_context: String,
    pub top_n: usize,
}

impl<'a> SynthesisInput<'a> {
    pub fn assemble(
        event: &'a EventRequest,
        analyses: &PartialAnalyses,
        documents: &[RetrievedDocument],
        top_n: usize,
    ) -> Self {
        let historical_context = documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            event,
            capacity: analyses.slot_text(AnalysisKind::Capacity),
            amenity: analyses.slot_text(AnalysisKind::Amenity),
            location: analyses.slot_text(AnalysisKind::Location),
            cost: analyses.slot_text(AnalysisKind::Cost),
            historical_context,
            top_n,
        }
    }

    pub fn slot(&self, kind: AnalysisKind) -> &str {
        match kind {
            AnalysisKind::Capacity => &self.capacity,
            AnalysisKind::Amenity => &self.amenity,
            AnalysisKind::Location => &self.location,
            AnalysisKind::Cost => &self.cost,
        }
    }

    /// Dimensions whose slot is empty.
    pub fn missing(&self) -> Vec<AnalysisKind> {
        AnalysisKind::ALL
            .into_iter()
            .filter(|k| self.slot(*k).is_empty())
            .collect()
    }
}

/// The ranking and narrative step behind the synthesis seam.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, input: &SynthesisInput<'_>) -> RoleResult<RecommendationSet>;
}

#[derive(Debug)]
pub struct SynthesisReport {
    pub status: AgentStatus,
    pub outcome: RoleResult<RecommendationSet>,
}

/// Handle wrapping one [`Synthesizer`].
pub struct SynthesisRole {
    synthesizer: Arc<dyn Synthesizer>,
    status: Mutex<AgentStatus>,
}

impl SynthesisRole {
    pub fn new(synthesizer: Arc<dyn Synthesizer>) -> Self {
        Self {
            synthesizer,
            status: Mutex::new(AgentStatus::Pending),
        }
    }

    pub fn status(&self) -> AgentStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run synthesis once. Never retried by the caller.
    #[instrument(skip_all, fields(top_n = input.top_n, missing = input.missing().len()))]
    pub async fn run(&self, input: &SynthesisInput<'_>) -> SynthesisReport {
        let attempt = AssertUnwindSafe(self.synthesizer.synthesize(input))
            .catch_unwind()
            .await;

        let outcome = match attempt {
            Ok(Ok(set)) => validate(set, input.top_n),
            Ok(Err(e)) => Err(e),
            Err(payload) => Err(RoleError::Panicked {
                role: ROLE_NAME.to_string(),
                detail: panic_detail(payload.as_ref()),
            }),
        };

        let status = if outcome.is_ok() {
            AgentStatus::Success
        } else {
            AgentStatus::Failure
        };
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;

        SynthesisReport { status, outcome }
    }
}

fn validate(mut set: RecommendationSet, top_n: usize) -> RoleResult<RecommendationSet> {
    if let Some(bad) = set.recommendations.iter().find(|r| r.ranking == 0) {
        return Err(RoleError::malformed(
            ROLE_NAME,
            format!("venue {} has ranking 0", bad.venue_id),
        ));
    }
    set.recommendations.truncate(top_n);
    Ok(set)
}
