//! Amenity matching analyst.

use std::sync::Arc;

use async_trait::async_trait;
use venue_history::{EventRequest, RecordFields, RetrievedDocument, VenueRecord};
use venue_llm::ChatModel;

use super::complete_structured;
use super::prompt::{join_or, similar_events, venue_blocks};
use crate::domain::{AnalysisOutput, VenueAmenityAnalysis};
use crate::role_orchestration::error::RoleResult;
use crate::role_orchestration::roles::Analyst;

const SYSTEM_PROMPT: &str = r#"You are an expert Amenity Matching Agent for event venue recommendations.

Analyze how well each venue's amenities match the event, considering:
1. Required amenities (must-have equipment and services)
2. Preferred amenities (nice-to-have)
3. Special requirements such as dietary restrictions and accessibility
4. Patterns from similar past events
5. Score higher when the venue meets the client's preferences and special requirements

Confirm which required amenities are available, identify missing critical
amenities and evaluate special requirements. Be specific and cite the
historical events where relevant.

---
Return Format:
Return only a JSON object of this shape, one entry per venue:
{"venue_amenity_analysis": [{
  "score": <integer 0-100>,
  "analysis": "<short summary>",
  "venue_name": "<name>",
  "venue_id": "<id>",
  "required_amenities_match": <bool>,
  "missing_amenities": ["<amenity>"],
  "available_amenities": ["<amenity>"],
  "special_requirements_status": "<met|partially_met|not_met>",
  "recommendation": {"recommend": <bool>, "pros": "<text>", "cons": "<text>"}
}]}"#;

/// Scores venues on required and preferred amenities.
pub struct AmenityAnalyst {
    model: Arc<dyn ChatModel>,
}

impl AmenityAnalyst {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

fn event_requirements(event: &EventRequest) -> String {
    let preferred = event.str_list("preferred_amenities");
    let special = event.str_list("special_requirements");

    let mut parts = vec![
        format!("Event Type: {}", event.str_field("event_type").unwrap_or("unknown")),
        format!("Event Style: {}", event.text("event_style")),
        format!(
            "Required Amenities: {}",
            join_or(&event.str_list("required_amenities"), "None specified")
        ),
    ];
    if !preferred.is_empty() {
        parts.push(format!("Preferred Amenities: {}", preferred.join(", ")));
    }
    if !special.is_empty() {
        parts.push(format!("Special Requirements: {}", special.join(", ")));
    }
    parts.join("\n")
}

fn venue_amenities(venue: &VenueRecord) -> String {
    let features = venue.str_list("features");
    let catering = venue.str_list("catering_options");

    let mut parts = vec![
        format!("Venue: {}", venue.name()),
        format!("Venue ID: {}", venue.venue_id().unwrap_or_default()),
        format!(
            "Available Amenities: {}",
            join_or(&venue.str_list("amenities"), "None listed")
        ),
    ];
    if !features.is_empty() {
        parts.push(format!("Features: {}", features.join(", ")));
    }
    if !catering.is_empty() {
        parts.push(format!("Catering Options: {}", catering.join(", ")));
    }
    if venue.bool_field("av_included").unwrap_or(false) {
        parts.push("AV Equipment: Included in-house".to_string());
    } else {
        parts.push("AV Equipment: May require external rental".to_string());
    }
    parts.join("\n")
}

#[async_trait]
impl Analyst for AmenityAnalyst {
    async fn analyze(
        &self,
        event: &EventRequest,
        venues: &[VenueRecord],
        documents: &[RetrievedDocument],
    ) -> RoleResult<AnalysisOutput> {
        let user = format!(
            "Event Requirements:\n{}\n\nVenue Amenities:\n{}\n\n\
             Retrieved Similar Events (for context):\n{}\n\n\
             Analyze the amenity matching and provide your assessment in the required format.",
            event_requirements(event),
            venue_blocks(venues.iter().map(venue_amenities).collect()),
            similar_events(documents, None),
        );

        let analysis: VenueAmenityAnalysis =
            complete_structured(self.model.as_ref(), "amenity", SYSTEM_PROMPT.to_string(), user)
                .await?;
        Ok(AnalysisOutput::Amenity(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_required_amenities_fall_back() {
        let event = EventRequest::from_json(json!({"event_type": "gala"})).unwrap();
        let text = event_requirements(&event);
        assert!(text.contains("Required Amenities: None specified"));
        assert!(!text.contains("Preferred Amenities"));
    }

    #[test]
    fn test_av_flag_wording() {
        let with_av = VenueRecord::from_json(json!({"name": "A", "av_included": true})).unwrap();
        let without = VenueRecord::from_json(json!({"name": "B", "amenities": ["wifi"]})).unwrap();
        assert!(venue_amenities(&with_av).contains("Included in-house"));
        assert!(venue_amenities(&without).contains("May require external rental"));
        assert!(venue_amenities(&without).contains("Available Amenities: wifi"));
    }
}
