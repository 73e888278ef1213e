//! Venue-Core: multi-agent venue recommendation
//!
//! Fans an event request out to four analysis roles (capacity, amenity,
//! location, cost), recovers from role failures, and synthesizes a ranked
//! recommendation list.
//!
//! ## Key Components
//!
//! - [`Orchestrator`]: parallel dispatch, total-failure retry, synthesis
//! - [`AnalysisRole`] / [`Analyst`]: one scoring dimension and its seam
//! - [`SynthesisRole`] / [`Synthesizer`]: the ranking step and its seam
//! - [`agents`]: language-model implementations of both seams
//! - [`ServiceConfig`]: layered configuration

pub mod agents;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod obs;
pub mod role_orchestration;
pub mod telemetry;

pub use agents::{
    llm_analysts, AmenityAnalyst, CapacityAnalyst, CostAnalyst, LocationAnalyst, VenueRecommender,
};
pub use config::{ConfigError, LoggerConfig, OrchestratorConfig, RetrievalConfig, ServiceConfig};
pub use domain::{
    AgentStatus, AnalysisKind, AnalysisOutput, DimensionNarrative, PartialAnalyses,
    RecommendationSet, VenueRecommendation,
};
pub use role_orchestration::error::{RoleError, RoleResult};
pub use role_orchestration::orchestrator::{Orchestrator, RecommendOutcome};
pub use role_orchestration::retry::RetryController;
pub use role_orchestration::roles::{AnalysisRole, Analyst, AnalystSet, RoleReport};
pub use role_orchestration::synthesis::{
    SynthesisInput, SynthesisReport, SynthesisRole, Synthesizer,
};

pub use metrics::METRICS;
pub use obs::{
    emit_recommend_finished, emit_recommend_started, emit_retry_attempt, emit_role_failed,
    emit_role_finished, emit_synthesis_failed, emit_total_failure,
};
pub use telemetry::{init_from_config, init_tracing};

/// Venue-Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
