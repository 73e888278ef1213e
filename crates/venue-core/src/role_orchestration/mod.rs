//! Venue analysis role orchestration.
//!
//! Four analysis roles (capacity, amenity, location, cost) score candidate
//! venues in parallel; a synthesis role turns their output into a ranked
//! recommendation list.
//!
//! # Module layout
//!
//! - [`roles`] — `Analyst`, `AnalysisRole`, `RoleReport`, `AnalystSet`
//! - [`error`] — `RoleError`, `RoleResult`
//! - [`retry`] — `RetryController`
//! - [`synthesis`] — `Synthesizer`, `SynthesisRole`, `SynthesisInput`
//! - [`orchestrator`] — `Orchestrator`, `RecommendOutcome`

pub mod error;
pub mod orchestrator;
pub mod retry;
pub mod roles;
pub mod synthesis;
