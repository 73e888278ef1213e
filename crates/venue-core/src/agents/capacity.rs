//! Capacity and space analyst.

use std::sync::Arc;

use async_trait::async_trait;
use venue_history::{EventRequest, RecordFields, RetrievedDocument, VenueRecord};
use venue_llm::ChatModel;

use super::complete_structured;
use super::prompt::{grouped, similar_events, venue_blocks};
use crate::domain::{AnalysisOutput, VenueCapacityAnalysis};
use crate::role_orchestration::error::RoleResult;
use crate::role_orchestration::roles::Analyst;

const SYSTEM_PROMPT: &str = r#"You are an expert Capacity & Space Agent for event venue recommendations.

Analyze how well each venue's capacity and space configuration matches the event, considering:
1. Attendee count against venue capacity; 70-90% utilization is usually ideal
2. Meeting rooms available for breakout sessions
3. Room layouts and flexibility
4. Space for registration, networking and other activities
5. Patterns from similar past events
6. Score higher when the venue matches the client's capacity and space needs

Use the similar event history to learn which capacity ranges worked, common
space-related problems, and feedback about utilization. Be specific and cite
the historical events where relevant.

---
Return Format:
Return only a JSON object of this shape, one entry per venue:
{"capacity_analysis": [{
  "score": <integer 0-100>,
  "analysis": "<short summary>",
  "venue_name": "<name>",
  "venue_id": "<id>",
  "capacity_suitable": <bool>,
  "capacity_utilization": <attendee_count / max_capacity>,
  "meeting_rooms_sufficient": <bool>,
  "space_adequacy": "<excellent|good|adequate|tight|insufficient>",
  "recommendations": {"recommend": <bool>, "pros": "<text>", "cons": "<text>"}
}]}"#;

/// Scores venues on attendee fit, rooms and space.
pub struct CapacityAnalyst {
    model: Arc<dyn ChatModel>,
}

impl CapacityAnalyst {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

pub(crate) fn event_requirements(event: &EventRequest) -> String {
    let special = event.str_list("special_requirements");
    let mut parts = vec![
        format!("Event Type: {}", event.str_field("event_type").unwrap_or("unknown")),
        format!("Attendee Count: {}", event.u64_field("attendee_count").unwrap_or(0)),
        format!("Duration: {} days", event.u64_field("duration_days").unwrap_or(0)),
    ];

    if !special.is_empty() {
        parts.push(format!("Special Requirements: {}", special.join(", ")));
    }
    let breakout: Vec<&str> = special
        .iter()
        .filter(|r| r.to_lowercase().contains("breakout"))
        .map(String::as_str)
        .collect();
    if !breakout.is_empty() {
        parts.push(format!("Breakout Room Requirements: {}", breakout.join(", ")));
    }

    parts.join("\n")
}

pub(crate) fn venue_capacity(venue: &VenueRecord) -> String {
    let mut parts = vec![
        format!("Venue: {}", venue.name()),
        format!("Venue ID: {}", venue.venue_id().unwrap_or_default()),
        format!("Maximum Capacity: {}", venue.u64_field("max_capacity").unwrap_or(0)),
        format!("Minimum Capacity: {}", venue.u64_field("min_capacity").unwrap_or(0)),
        format!("Meeting Rooms: {}", venue.u64_field("meeting_rooms").unwrap_or(0)),
    ];

    if venue.u64_field("total_sqft").unwrap_or(0) > 0 {
        parts.push(format!("Total Square Footage: {} sqft", grouped(venue, "total_sqft")));
    }
    if venue.u64_field("largest_room_sqft").unwrap_or(0) > 0 {
        parts.push(format!("Largest Room: {} sqft", grouped(venue, "largest_room_sqft")));
    }
    if let Some(ballroom) = venue.u64_field("ballroom_capacity").filter(|c| *c > 0) {
        parts.push(format!("Ballroom Capacity: {ballroom}"));
    }

    parts.join("\n")
}

#[async_trait]
impl Analyst for CapacityAnalyst {
    async fn analyze(
        &self,
        event: &EventRequest,
        venues: &[VenueRecord],
        documents: &[RetrievedDocument],
    ) -> RoleResult<AnalysisOutput> {
        let user = format!(
            "Event Requirements:\n{}\n\nCapacity & Space for each venue:\n{}\n\n\
             There are {} venues in total. Analyze the capacity and space for each venue separately.\n\n\
             Retrieved Similar Events (for context):\n{}\n\n\
             Analyze the capacity and space matching and provide your assessment in the required format.",
            event_requirements(event),
            venue_blocks(venues.iter().map(venue_capacity).collect()),
            venues.len(),
            similar_events(documents, Some(5)),
        );

        let analysis: VenueCapacityAnalysis =
            complete_structured(self.model.as_ref(), "capacity", SYSTEM_PROMPT.to_string(), user)
                .await?;
        Ok(AnalysisOutput::Capacity(analysis))
    }
}
