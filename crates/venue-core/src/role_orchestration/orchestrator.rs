//! Fan-out, recovery and synthesis for one recommendation request.
//!
//! All four analysis roles run concurrently and are always awaited to
//! completion. When every one of them fails, the failed roles are retried
//! and the recovered analyses are returned without synthesis. Otherwise the
//! usable analyses go to the synthesis role exactly once.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;
use venue_history::{EventRequest, RetrievedDocument};

use crate::domain::{AnalysisKind, PartialAnalyses, RecommendationSet};
use crate::metrics::METRICS;
use crate::obs::{
    emit_recommend_finished, emit_recommend_started, emit_synthesis_failed, emit_total_failure,
};
use crate::role_orchestration::retry::RetryController;
use crate::role_orchestration::roles::{AnalysisRole, AnalystSet};
use crate::role_orchestration::synthesis::{SynthesisInput, SynthesisRole, Synthesizer};

/// Result of [`Orchestrator::recommend`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum RecommendOutcome {
    /// Synthesis succeeded.
    Full(RecommendationSet),
    /// Every role failed on the first pass; holds whatever retries recovered.
    Partial(PartialAnalyses),
    /// Synthesis failed; the analyses it was given are kept.
    SynthesisFailed {
        analyses: PartialAnalyses,
        error: String,
    },
}

impl RecommendOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendOutcome::Full(_) => "full",
            RecommendOutcome::Partial(_) => "partial",
            RecommendOutcome::SynthesisFailed { .. } => "synthesis_failed",
        }
    }

    pub fn recommendations(&self) -> Option<&RecommendationSet> {
        match self {
            RecommendOutcome::Full(set) => Some(set),
            _ => None,
        }
    }
}

/// Coordinates the analysis roles and the synthesis role.
pub struct Orchestrator {
    roles: Vec<AnalysisRole>,
    synthesis: SynthesisRole,
    retry: RetryController,
}

impl Orchestrator {
    pub fn new(
        analysts: AnalystSet,
        synthesizer: Arc<dyn Synthesizer>,
        retry: RetryController,
    ) -> Self {
        Self {
            roles: analysts.into_roles(),
            synthesis: SynthesisRole::new(synthesizer),
            retry,
        }
    }

    pub fn roles(&self) -> &[AnalysisRole] {
        &self.roles
    }

    pub fn role(&self, kind: AnalysisKind) -> Option<&AnalysisRole> {
        self.roles.iter().find(|r| r.kind() == kind)
    }

    pub fn synthesis(&self) -> &SynthesisRole {
        &self.synthesis
    }

    /// Recommend up to `top_n` venues for `event`.
    ///
    /// Never fails: role and synthesis errors are folded into the outcome.
    #[instrument(
        skip_all,
        fields(request_id = %Uuid::new_v4(), event_id = event.event_id().unwrap_or("unknown"))
    )]
    pub async fn recommend(
        &self,
        event: &EventRequest,
        documents: &[RetrievedDocument],
        top_n: usize,
    ) -> RecommendOutcome {
        let started = Instant::now();
        METRICS.inc_recommendations();
        emit_recommend_started(
            event.event_id().unwrap_or("unknown"),
            documents.len(),
            top_n,
        );

        let reports = join_all(self.roles.iter().map(|role| role.run(event, documents))).await;

        let all_failed = reports.iter().all(|r| !r.has_result());
        let mut to_retry = Vec::new();
        let mut analyses = PartialAnalyses::default();
        for (role, report) in self.roles.iter().zip(reports) {
            if report.needs_retry() {
                to_retry.push(role);
            }
            if let Some(output) = report.into_usable() {
                analyses.insert(output);
            }
        }

        if all_failed {
            emit_total_failure(to_retry.len());
            let recovered = join_all(
                to_retry
                    .iter()
                    .map(|role| self.retry.retry_role(role, event, documents)),
            )
            .await;
            for output in recovered.into_iter().flatten() {
                analyses.insert(output);
            }

            let outcome = RecommendOutcome::Partial(analyses);
            self.finish(&outcome, started);
            return outcome;
        }

        debug!(available = ?analyses.kinds(), "synthesizing from analyses");
        let input = SynthesisInput::assemble(event, &analyses, documents, top_n);
        let report = self.synthesis.run(&input).await;

        let outcome = match report.outcome {
            Ok(set) => RecommendOutcome::Full(set),
            Err(e) => {
                METRICS.inc_synthesis_failures();
                emit_synthesis_failed(&e);
                RecommendOutcome::SynthesisFailed {
                    analyses,
                    error: e.to_string(),
                }
            }
        };
        self.finish(&outcome, started);
        outcome
    }

    fn finish(&self, outcome: &RecommendOutcome, started: Instant) {
        let analyses = match outcome {
            RecommendOutcome::Full(set) => set.len(),
            RecommendOutcome::Partial(a) => a.len(),
            RecommendOutcome::SynthesisFailed { analyses, .. } => analyses.len(),
        };
        emit_recommend_finished(
            outcome.label(),
            started.elapsed().as_millis() as u64,
            analyses,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DimensionNarrative, VenueRecommendation};

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let set = RecommendationSet {
            recommendations: vec![VenueRecommendation {
                venue_id: "V1".to_string(),
                venue_name: "Hall".to_string(),
                ranking: 1,
                estimated_cost: 42_000,
                analysis: DimensionNarrative {
                    capacity: "fits".to_string(),
                    amenity: String::new(),
                    location: String::new(),
                    cost: String::new(),
                    similar_events: String::new(),
                },
                strengths: vec![],
                considerations: vec![],
            }],
        };
        let json = serde_json::to_value(RecommendOutcome::Full(set)).unwrap();
        assert_eq!(json["status"], "full");
        assert_eq!(json["result"]["recommendations"][0]["ranking"], 1);
    }

    #[test]
    fn test_partial_label() {
        let outcome = RecommendOutcome::Partial(PartialAnalyses::default());
        assert_eq!(outcome.label(), "partial");
        assert!(outcome.recommendations().is_none());
    }
}
