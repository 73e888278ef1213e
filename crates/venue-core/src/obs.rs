//! Structured lifecycle events for a recommendation request.
//!
//! Every event carries an `event` field so log pipelines can filter on it.
//! Request-level fields such as `request_id` come from the enclosing span.

use tracing::{info, warn};

use crate::domain::{AgentStatus, AnalysisKind};

/// Emit event: recommendation started.
pub fn emit_recommend_started(event_id: &str, document_count: usize, top_n: usize) {
    info!(
        event = "recommend.started",
        event_id = %event_id,
        documents = document_count,
        top_n = top_n,
    );
}

/// Emit event: one role run finished.
pub fn emit_role_finished(role: AnalysisKind, status: AgentStatus, venues: usize) {
    info!(
        event = "role.finished",
        role = %role,
        status = %status,
        venues = venues,
    );
}

/// Emit event: a role run failed (warning level).
pub fn emit_role_failed(role: AnalysisKind, error: &dyn std::fmt::Display) {
    warn!(event = "role.failed", role = %role, error = %error);
}

/// Emit event: one retry attempt for a role.
pub fn emit_retry_attempt(role: AnalysisKind, attempt: u32, max_attempts: u32, success: bool) {
    info!(
        event = "role.retry_attempt",
        role = %role,
        attempt = attempt,
        max_attempts = max_attempts,
        success = success,
    );
}

/// Emit event: every analysis role failed on the first pass (warning level).
pub fn emit_total_failure(roles: usize) {
    warn!(event = "recommend.total_failure", roles = roles);
}

/// Emit event: synthesis failed (warning level).
pub fn emit_synthesis_failed(error: &dyn std::fmt::Display) {
    warn!(event = "synthesis.failed", error = %error);
}

/// Emit event: recommendation finished with its outcome tag.
pub fn emit_recommend_finished(outcome: &str, duration_ms: u64, analyses: usize) {
    info!(
        event = "recommend.finished",
        outcome = %outcome,
        duration_ms = duration_ms,
        analyses = analyses,
    );
}
