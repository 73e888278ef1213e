//! Error types for role orchestration.

use venue_llm::LlmError;

use crate::domain::AnalysisKind;

/// Errors produced inside a role.
///
/// These never escape [`recommend`](crate::role_orchestration::orchestrator::Orchestrator::recommend);
/// they are carried in role reports and logged.
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("{role} failed: {reason}")]
    AnalystFailed { role: String, reason: String },

    #[error("{role} returned malformed output: {detail}")]
    MalformedOutput { role: String, detail: String },

    #[error("{role} returned a {actual} analysis")]
    MismatchedOutput { role: AnalysisKind, actual: AnalysisKind },

    #[error("{role} panicked: {detail}")]
    Panicked { role: String, detail: String },

    #[error("language model error: {0}")]
    Llm(#[from] LlmError),
}

impl RoleError {
    pub fn analyst_failed(role: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        RoleError::AnalystFailed {
            role: role.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(role: impl std::fmt::Display, detail: impl Into<String>) -> Self {
        RoleError::MalformedOutput {
            role: role.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type for role operations.
pub type RoleResult<T> = std::result::Result<T, RoleError>;

/// Render a caught panic payload.
pub(crate) fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
