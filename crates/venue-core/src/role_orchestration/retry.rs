//! Bounded sequential re-invocation of a failed role.

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use venue_history::{EventRequest, RetrievedDocument};

use crate::domain::AnalysisOutput;
use crate::metrics::METRICS;
use crate::obs::emit_retry_attempt;
use crate::role_orchestration::roles::AnalysisRole;

/// Default number of retry attempts per role.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retry policy for roles that failed on the first pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryController {
    pub max_attempts: u32,
}

impl Default for RetryController {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryController {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Re-run `role` until it produces a usable report or attempts run out.
    ///
    /// Attempts are strictly sequential. Returns `None` when every attempt
    /// failed, leaving the role's status at `Failure`.
    #[instrument(skip_all, fields(role = %role.kind(), max_attempts = self.max_attempts))]
    pub async fn retry_role(
        &self,
        role: &AnalysisRole,
        event: &EventRequest,
        documents: &[RetrievedDocument],
    ) -> Option<AnalysisOutput> {
        for attempt in 1..=self.max_attempts {
            info!(role = %role.kind(), attempt, max_attempts = self.max_attempts, "retrying role");
            METRICS.inc_retry_attempts();

            let report = role.run(event, documents).await;
            emit_retry_attempt(role.kind(), attempt, self.max_attempts, report.is_usable());

            if let Some(output) = report.into_usable() {
                info!(role = %role.kind(), attempt, "role succeeded on retry");
                return Some(output);
            }
        }

        error!(
            role = %role.kind(),
            attempts = self.max_attempts,
            "role failed after all retry attempts"
        );
        None
    }
}
