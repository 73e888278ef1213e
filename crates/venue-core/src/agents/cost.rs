//! Cost and budget analyst.
//!
//! Unlike the other analysts this one is shown one venue per retrieved
//! document, so a venue that hosted several similar events appears once per
//! event with that event's context.

use std::sync::Arc;

use async_trait::async_trait;
use venue_history::{EventRequest, RecordFields, RetrievedDocument, VenueRecord};
use venue_llm::ChatModel;

use super::complete_structured;
use super::prompt::{money, similar_events, text_or, venue_blocks, yes_no};
use crate::domain::{AnalysisOutput, VenueCostAnalysis};
use crate::role_orchestration::error::RoleResult;
use crate::role_orchestration::roles::Analyst;

const SYSTEM_PROMPT: &str = r#"You are an expert Cost Analysis Agent for event venue recommendations.

Analyze how well each venue's pricing fits the event budget, considering:
1. Event budget and budget flexibility
2. Venue daily rates and fees
3. Estimated catering, AV and other service costs
4. Value compared to similar venues
5. Hidden costs such as parking, setup fees and cancellation policies
6. Cost patterns from similar past events
7. Score higher when the venue pricing matches the client's budget

Estimate the total cost from the event duration and requirements, say whether
it fits the budget, and list potential hidden costs. Be specific and to the
point.

---
Return Format Instructions:
Do not include commas in the numbers.
Return only a JSON object of this shape, one entry per venue:
{"cost_analysis": [{
  "score": <integer 0-100>,
  "analysis": "<short summary>",
  "budget_met": <bool>,
  "estimated_total_cost": <number>,
  "cost_breakdown": {"<component>": <number>},
  "value_assessment": "<excellent|good|fair|poor>",
  "hidden_costs": ["<cost>"],
  "recommendation": {"recommend": <bool>, "pros": "<text>", "cons": "<text>"}
}]}"#;

/// Estimates total cost per venue against the budget.
pub struct CostAnalyst {
    model: Arc<dyn ChatModel>,
}

impl CostAnalyst {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

fn event_budget(event: &EventRequest) -> String {
    [
        format!("Event Budget: {}", money(event, "budget")),
        format!(
            "Budget Flexibility: {}",
            text_or(event, "budget_flexibility", "firm")
        ),
        format!("Duration: {} days", event.u64_field("duration_days").unwrap_or(1)),
    ]
    .join("\n")
}

fn venue_pricing(venue: &VenueRecord) -> String {
    [
        format!("Venue: {}", venue.name()),
        format!("Daily Rate: {}", money(venue, "daily_rate")),
        format!("Half-Day Rate: {}", money(venue, "half_day_rate")),
        format!("Setup Fee: {}", money(venue, "setup_fee")),
        format!(
            "AV Equipment Included: {}",
            yes_no(venue.bool_field("av_included").unwrap_or(false))
        ),
        format!("Cancellation Policy: {}", venue.text("cancellation_policy")),
    ]
    .join("\n")
}

#[async_trait]
impl Analyst for CostAnalyst {
    async fn analyze(
        &self,
        event: &EventRequest,
        venues: &[VenueRecord],
        documents: &[RetrievedDocument],
    ) -> RoleResult<AnalysisOutput> {
        let user = format!(
            "Event Budget Requirements:\n{}\n\nVenue Pricing:\n{}\n\n\
             Retrieved Similar Events (for context):\n{}\n\n\
             Analyze the cost and budget matching and provide your assessment in the required format.",
            event_budget(event),
            venue_blocks(venues.iter().map(venue_pricing).collect()),
            similar_events(documents, Some(5)),
        );

        let analysis: VenueCostAnalysis =
            complete_structured(self.model.as_ref(), "cost", SYSTEM_PROMPT.to_string(), user)
                .await?;
        Ok(AnalysisOutput::Cost(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_defaults() {
        let event = EventRequest::from_json(json!({"budget": 50000})).unwrap();
        let text = event_budget(&event);
        assert!(text.contains("Event Budget: $50,000"));
        assert!(text.contains("Budget Flexibility: firm"));
        assert!(text.contains("Duration: 1 days"));
    }

    #[test]
    fn test_pricing_formats_dollars() {
        let venue = VenueRecord::from_json(json!({
            "name": "Hall", "daily_rate": 12000, "setup_fee": 750, "av_included": true
        }))
        .unwrap();
        let text = venue_pricing(&venue);
        assert!(text.contains("Daily Rate: $12,000"));
        assert!(text.contains("Half-Day Rate: $0"));
        assert!(text.contains("AV Equipment Included: True"));
    }
}
