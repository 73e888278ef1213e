//! Location and accessibility analyst.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use venue_history::{display_value, EventRequest, RecordFields, RetrievedDocument, VenueRecord};
use venue_llm::ChatModel;

use super::complete_structured;
use super::prompt::{similar_events, text_or, venue_blocks, yes_no};
use crate::domain::{AnalysisOutput, VenueLocationAnalysis};
use crate::role_orchestration::error::RoleResult;
use crate::role_orchestration::roles::Analyst;

fn system_prompt(venue_count: usize) -> String {
    format!(
        r#"You are an expert Location Agent for event venue recommendations.

Analyze how well each venue's location matches the event's geographic preferences, considering:
1. Location preference (regions and cities)
2. Airport distance and accessibility
3. Public transit availability
4. Nearby hotels and accommodations
5. Patterns from similar past events in the same location
6. There are {venue_count} venues in total. Analyze the location of each venue separately.
7. Keep at most the 10 most suitable venues.
8. Score higher when the venue matches the client's location preferences

Be specific and cite the historical events where relevant.

---
Return Format:
Return only a JSON object of this shape, one entry per venue:
{{"location_analysis": [{{
  "score": <integer 0-100>,
  "analysis": "<short summary>",
  "venue_name": "<name>",
  "venue_id": "<id>",
  "location_match": <bool>,
  "region_match": <bool>,
  "accessibility_score": <0.0-1.0>,
  "nearby_accommodations": <integer>,
  "recommendations": {{"recommend": <bool>, "pros": "<text>", "cons": "<text>"}}
}}]}}"#
    )
}

/// Scores venues on geography, transit and accommodation.
pub struct LocationAnalyst {
    model: Arc<dyn ChatModel>,
}

impl LocationAnalyst {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

fn nested_list(parent: Option<&Value>, key: &str) -> Vec<String> {
    match parent.and_then(|p| p.get(key)) {
        Some(Value::Array(items)) => items.iter().map(display_value).collect(),
        _ => Vec::new(),
    }
}

fn event_location(event: &EventRequest) -> String {
    let requirements = event.get("location_requirements");
    let regions = nested_list(requirements, "region");
    let cities = nested_list(requirements, "cities");

    let mut parts = vec![format!(
        "Location Preference: {}",
        event.text("location_preference")
    )];
    if !regions.is_empty() {
        parts.push(format!("Preferred Regions: {}", regions.join(", ")));
    }
    if !cities.is_empty() {
        parts.push(format!("Preferred Cities: {}", cities.join(", ")));
    }
    if let Some(max) = requirements
        .and_then(|r| r.get("max_airport_distance_miles"))
        .filter(|v| !v.is_null())
    {
        parts.push(format!("Maximum Airport Distance: {} miles", display_value(max)));
    }
    parts.join("\n")
}

fn venue_location(venue: &VenueRecord) -> String {
    let mut parts = vec![
        format!("Venue: {}", venue.name()),
        format!("Venue ID: {}", venue.venue_id().unwrap_or_default()),
        format!("City: {}", venue.text("city")),
    ];
    for (key, label) in [("state", "State"), ("region", "Region"), ("address", "Address")] {
        let value = venue.text(key);
        if !value.is_empty() {
            parts.push(format!("{label}: {value}"));
        }
    }
    if venue.get("airport_distance_miles").is_some() {
        parts.push(format!(
            "Airport Distance: {} miles",
            text_or(venue, "airport_distance_miles", "")
        ));
    }
    parts.push(format!(
        "Public Transit Available: {}",
        yes_no(venue.bool_field("public_transit").unwrap_or(false))
    ));
    if let Some(hotels) = venue.u64_field("nearby_hotels").filter(|h| *h > 0) {
        parts.push(format!("Nearby Hotels: {hotels}"));
    }
    parts.join("\n")
}

#[async_trait]
impl Analyst for LocationAnalyst {
    async fn analyze(
        &self,
        event: &EventRequest,
        venues: &[VenueRecord],
        documents: &[RetrievedDocument],
    ) -> RoleResult<AnalysisOutput> {
        let user = format!(
            "Event Location Requirements:\n{}\n\nVenue Location:\n{}\n\n\
             Retrieved Similar Events (for context):\n{}\n\n\
             Analyze the location matching and provide your assessment in the required format.",
            event_location(event),
            venue_blocks(venues.iter().map(venue_location).collect()),
            similar_events(documents, None),
        );

        let analysis: VenueLocationAnalysis = complete_structured(
            self.model.as_ref(),
            "location",
            system_prompt(venues.len()),
            user,
        )
        .await?;
        Ok(AnalysisOutput::Location(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_location_reads_nested_requirements() {
        let event = EventRequest::from_json(json!({
            "location_preference": "West Coast",
            "location_requirements": {
                "region": ["West"],
                "cities": ["San Francisco, CA", "Seattle, WA"],
                "max_airport_distance_miles": 20
            }
        }))
        .unwrap();
        let text = event_location(&event);
        assert!(text.contains("Preferred Cities: San Francisco, CA, Seattle, WA"));
        assert!(text.contains("Maximum Airport Distance: 20 miles"));
    }

    #[test]
    fn test_venue_location_always_states_transit() {
        let venue = VenueRecord::from_json(json!({"name": "Pier", "city": "Oakland"})).unwrap();
        let text = venue_location(&venue);
        assert!(text.contains("Public Transit Available: False"));
        assert!(!text.contains("Airport Distance"));
        assert!(!text.contains("State:"));
    }

    #[test]
    fn test_system_prompt_states_venue_count() {
        assert!(system_prompt(4).contains("There are 4 venues in total"));
    }
}
