//! Domain vocabulary for venue recommendation.

pub mod analysis;
pub mod recommendation;
pub mod status;

pub use analysis::{
    AmenityAssessment, AnalysisKind, AnalysisOutput, CapacityAssessment, CostAssessment,
    LocationAssessment, PartialAnalyses, VenueAmenityAnalysis, VenueCapacityAnalysis,
    VenueCostAnalysis, VenueLocationAnalysis, Verdict,
};
pub use recommendation::{DimensionNarrative, RecommendationSet, VenueRecommendation};
pub use status::AgentStatus;
