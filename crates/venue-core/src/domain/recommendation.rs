//! Final, client-facing recommendation records.

use serde::{Deserialize, Serialize};

/// Per-dimension narrative for one recommended venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionNarrative {
    pub capacity: String,
    pub amenity: String,
    pub location: String,
    /// Includes the cost breakdown in dollar amounts.
    pub cost: String,
    pub similar_events: String,
}

/// One ranked venue. Carries no numeric score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueRecommendation {
    pub venue_id: String,
    pub venue_name: String,
    /// 1 is the best match.
    pub ranking: u32,
    pub estimated_cost: u64,
    pub analysis: DimensionNarrative,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub considerations: Vec<String>,
}

/// Ranked recommendations for one event request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<VenueRecommendation>,
}

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    pub fn venue_ids(&self) -> Vec<&str> {
        self.recommendations
            .iter()
            .map(|r| r.venue_id.as_str())
            .collect()
    }
}
