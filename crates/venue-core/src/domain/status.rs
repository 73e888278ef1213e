//! Completion status of a role invocation.

use serde::{Deserialize, Serialize};

/// Tri-state completion signal for a role.
///
/// A role handle starts at `Pending`; every finished `run` leaves it at
/// `Success` or `Failure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Pending,
    Success,
    Failure,
}

impl AgentStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, AgentStatus::Pending)
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgentStatus::Pending => "pending",
            AgentStatus::Success => "success",
            AgentStatus::Failure => "failure",
        };
        write!(f, "{s}")
    }
}
