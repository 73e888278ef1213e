//! Typed results of the four analysis roles.
//!
//! Field sets mirror what each analyst is asked to return. Scores are
//! 0–100 and stay internal: they feed synthesis but never reach the final
//! recommendation records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The four analysis dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Capacity,
    Amenity,
    Location,
    Cost,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::Capacity,
        AnalysisKind::Amenity,
        AnalysisKind::Location,
        AnalysisKind::Cost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisKind::Capacity => "capacity",
            AnalysisKind::Amenity => "amenity",
            AnalysisKind::Location => "location",
            AnalysisKind::Cost => "cost",
        }
    }
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommend / pros / cons verdict attached to each per-venue assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub recommend: bool,
    #[serde(default)]
    pub pros: String,
    #[serde(default)]
    pub cons: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityAssessment {
    pub score: u32,
    pub analysis: String,
    pub venue_name: String,
    pub venue_id: String,
    pub capacity_suitable: bool,
    /// attendee_count / max_capacity
    pub capacity_utilization: f64,
    pub meeting_rooms_sufficient: bool,
    /// excellent, good, adequate, tight or insufficient
    pub space_adequacy: String,
    pub recommendations: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueCapacityAnalysis {
    pub capacity_analysis: Vec<CapacityAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityAssessment {
    pub score: u32,
    pub analysis: String,
    pub venue_name: String,
    pub venue_id: String,
    pub required_amenities_match: bool,
    #[serde(default)]
    pub missing_amenities: Vec<String>,
    #[serde(default)]
    pub available_amenities: Vec<String>,
    /// met, partially_met or not_met
    pub special_requirements_status: String,
    pub recommendation: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueAmenityAnalysis {
    pub venue_amenity_analysis: Vec<AmenityAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAssessment {
    pub score: u32,
    pub analysis: String,
    pub venue_name: String,
    pub venue_id: String,
    pub location_match: bool,
    pub region_match: bool,
    /// 0–1, from airport distance, transit and similar factors
    pub accessibility_score: f64,
    pub nearby_accommodations: u32,
    pub recommendations: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueLocationAnalysis {
    pub location_analysis: Vec<LocationAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAssessment {
    pub score: u32,
    pub analysis: String,
    pub budget_met: bool,
    pub estimated_total_cost: f64,
    #[serde(default)]
    pub cost_breakdown: BTreeMap<String, f64>,
    /// excellent, good, fair or poor
    pub value_assessment: String,
    #[serde(default)]
    pub hidden_costs: Vec<String>,
    pub recommendation: Verdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueCostAnalysis {
    pub cost_analysis: Vec<CostAssessment>,
}

/// Result of one analysis role, tagged by dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    Capacity(VenueCapacityAnalysis),
    Amenity(VenueAmenityAnalysis),
    Location(VenueLocationAnalysis),
    Cost(VenueCostAnalysis),
}

impl AnalysisOutput {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisOutput::Capacity(_) => AnalysisKind::Capacity,
            AnalysisOutput::Amenity(_) => AnalysisKind::Amenity,
            AnalysisOutput::Location(_) => AnalysisKind::Location,
            AnalysisOutput::Cost(_) => AnalysisKind::Cost,
        }
    }

    /// Every per-venue score in the output.
    pub fn scores(&self) -> Vec<u32> {
        match self {
            AnalysisOutput::Capacity(a) => a.capacity_analysis.iter().map(|v| v.score).collect(),
            AnalysisOutput::Amenity(a) => {
                a.venue_amenity_analysis.iter().map(|v| v.score).collect()
            }
            AnalysisOutput::Location(a) => a.location_analysis.iter().map(|v| v.score).collect(),
            AnalysisOutput::Cost(a) => a.cost_analysis.iter().map(|v| v.score).collect(),
        }
    }

    /// Number of per-venue assessments.
    pub fn venue_count(&self) -> usize {
        self.scores().len()
    }

    /// Text handed to the synthesis role for this dimension.
    pub fn to_prompt_text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Usable analysis results keyed by dimension.
///
/// Only successful roles appear; a failed role is absent, never stored
/// as an empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialAnalyses(BTreeMap<AnalysisKind, AnalysisOutput>);

impl PartialAnalyses {
    pub fn insert(&mut self, output: AnalysisOutput) {
        self.0.insert(output.kind(), output);
    }

    pub fn get(&self, kind: AnalysisKind) -> Option<&AnalysisOutput> {
        self.0.get(&kind)
    }

    pub fn contains(&self, kind: AnalysisKind) -> bool {
        self.0.contains_key(&kind)
    }

    pub fn kinds(&self) -> Vec<AnalysisKind> {
        self.0.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Prompt text for `kind`, or an empty string when the dimension is missing.
    pub fn slot_text(&self, kind: AnalysisKind) -> String {
        self.get(kind)
            .map(AnalysisOutput::to_prompt_text)
            .unwrap_or_default()
    }
}
