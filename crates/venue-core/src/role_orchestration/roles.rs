//! Analysis role handles: `Analyst`, `AnalysisRole`, `RoleReport`.
//!
//! An [`AnalysisRole`] wraps one opaque [`Analyst`] and owns everything the
//! orchestrator relies on: venue selection, output validation, panic
//! containment and the status cell. `run` never returns an error; failures
//! come back inside the [`RoleReport`].

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::FutureExt;
use tracing::instrument;
use venue_history::{document_venues, unique_venues, EventRequest, RetrievedDocument, VenueRecord};

use crate::domain::{AgentStatus, AnalysisKind, AnalysisOutput};
use crate::metrics::METRICS;
use crate::obs::{emit_role_failed, emit_role_finished};
use crate::role_orchestration::error::{panic_detail, RoleError, RoleResult};

/// Highest score an analyst may assign.
pub const MAX_SCORE: u32 = 100;

/// One scoring dimension behind the role seam.
///
/// Implementations may fail or panic; the wrapping [`AnalysisRole`] turns
/// both into a failed report.
#[async_trait]
pub trait Analyst: Send + Sync {
    async fn analyze(
        &self,
        event: &EventRequest,
        venues: &[VenueRecord],
        documents: &[RetrievedDocument],
    ) -> RoleResult<AnalysisOutput>;
}

/// What one `run` produced. Created once per run and never mutated.
#[derive(Debug)]
pub struct RoleReport {
    pub kind: AnalysisKind,
    pub status: AgentStatus,
    pub outcome: RoleResult<AnalysisOutput>,
}

impl RoleReport {
    pub fn new(kind: AnalysisKind, outcome: RoleResult<AnalysisOutput>) -> Self {
        let status = if outcome.is_ok() {
            AgentStatus::Success
        } else {
            AgentStatus::Failure
        };
        Self {
            kind,
            status,
            outcome,
        }
    }

    /// Success status and an `Ok` outcome.
    pub fn is_usable(&self) -> bool {
        self.status == AgentStatus::Success && self.outcome.is_ok()
    }

    pub fn has_result(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn needs_retry(&self) -> bool {
        self.outcome.is_err() || self.status == AgentStatus::Failure
    }

    pub fn into_usable(self) -> Option<AnalysisOutput> {
        if self.status == AgentStatus::Success {
            self.outcome.ok()
        } else {
            None
        }
    }
}

/// The four analysts handed to the orchestrator.
#[derive(Clone)]
pub struct AnalystSet {
    pub capacity: Arc<dyn Analyst>,
    pub amenity: Arc<dyn Analyst>,
    pub location: Arc<dyn Analyst>,
    pub cost: Arc<dyn Analyst>,
}

impl AnalystSet {
    /// Role handles in [`AnalysisKind::ALL`] order.
    pub fn into_roles(self) -> Vec<AnalysisRole> {
        vec![
            AnalysisRole::new(AnalysisKind::Capacity, self.capacity),
            AnalysisRole::new(AnalysisKind::Amenity, self.amenity),
            AnalysisRole::new(AnalysisKind::Location, self.location),
            AnalysisRole::new(AnalysisKind::Cost, self.cost),
        ]
    }
}

/// Handle for one analysis dimension.
pub struct AnalysisRole {
    kind: AnalysisKind,
    analyst: Arc<dyn Analyst>,
    status: Mutex<AgentStatus>,
}

impl std::fmt::Debug for AnalysisRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisRole")
            .field("kind", &self.kind)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl AnalysisRole {
    pub fn new(kind: AnalysisKind, analyst: Arc<dyn Analyst>) -> Self {
        Self {
            kind,
            analyst,
            status: Mutex::new(AgentStatus::Pending),
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        self.kind
    }

    /// Status left by the most recent `run`, `Pending` before the first.
    pub fn status(&self) -> AgentStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_status(&self, status: AgentStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }

    /// Venues this role is shown.
    ///
    /// Cost sees one venue per document; the other roles see each venue once.
    pub fn select_venues(&self, documents: &[RetrievedDocument]) -> Vec<VenueRecord> {
        match self.kind {
            AnalysisKind::Cost => document_venues(documents),
            _ => unique_venues(documents),
        }
    }

    /// Run the analyst once.
    #[instrument(skip_all, fields(role = %self.kind, documents = documents.len()))]
    pub async fn run(&self, event: &EventRequest, documents: &[RetrievedDocument]) -> RoleReport {
        let venues = self.select_venues(documents);

        let attempt = AssertUnwindSafe(self.analyst.analyze(event, &venues, documents))
            .catch_unwind()
            .await;

        let outcome = match attempt {
            Ok(Ok(output)) => self.validate(output),
            Ok(Err(e)) => Err(e),
            Err(payload) => Err(RoleError::Panicked {
                role: self.kind.to_string(),
                detail: panic_detail(payload.as_ref()),
            }),
        };

        let report = RoleReport::new(self.kind, outcome);
        self.set_status(report.status);

        match &report.outcome {
            Ok(output) => emit_role_finished(self.kind, report.status, output.venue_count()),
            Err(e) => {
                METRICS.inc_role_failures();
                emit_role_failed(self.kind, e);
                emit_role_finished(self.kind, report.status, 0);
            }
        }

        report
    }

    fn validate(&self, output: AnalysisOutput) -> RoleResult<AnalysisOutput> {
        if output.kind() != self.kind {
            return Err(RoleError::MismatchedOutput {
                role: self.kind,
                actual: output.kind(),
            });
        }
        if let Some(score) = output.scores().into_iter().find(|s| *s > MAX_SCORE) {
            return Err(RoleError::malformed(
                self.kind,
                format!("score {score} is outside 0..={MAX_SCORE}"),
            ));
        }
        Ok(output)
    }
}
