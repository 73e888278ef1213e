//! Synthesis agent: ranks venues and writes the client-facing narrative.

use std::sync::Arc;

use async_trait::async_trait;
use venue_llm::ChatModel;

use super::complete_structured;
use crate::domain::RecommendationSet;
use crate::role_orchestration::error::RoleResult;
use crate::role_orchestration::synthesis::{SynthesisInput, Synthesizer};

const UNAVAILABLE: &str = "Analysis unavailable.";

const SYSTEM_PROMPT: &str = r#"You are a Venue Recommendation Supervisor with a customer service mindset. Four expert agents (Capacity, Amenity, Location and Cost) have analyzed candidate venues; synthesize their findings into clear, helpful recommendations for the client.

1. Review all agent analyses, including scores, assessments, pros and cons.
   If an analysis is unavailable, say so briefly and work with what you have.
2. Write in your own words, naturally and conversationally. Back every claim
   with specific numbers from the analyses.
3. Use the similar events: count how many took place at each venue and
   summarize ratings, outcomes and feedback.
4. Rank venues:
   - Priority 1: Capacity and Location (scores of 70 or more preferred)
   - Priority 2: Overall fit across all four dimensions
   - Priority 3: Historical performance from similar events
   - Priority 4: Budget compliance and value
5. For each venue cover capacity utilization and rooms, available and missing
   amenities, accessibility and nearby accommodations, and the complete cost
   breakdown with a dollar amount per component, the estimated total and the
   budget comparison.

IMPORTANT: scores are for internal ranking only. NEVER mention scores (0-100)
in any text. NEVER mention venue IDs, client IDs or event IDs in any text.

---
Return Format:
Return only a JSON object of this shape, best venue first, rankings starting at 1:
{"recommendations": [{
  "venue_id": "<id>",
  "venue_name": "<name>",
  "ranking": <integer >= 1>,
  "estimated_cost": <integer dollars>,
  "analysis": {
    "capacity": "<text>",
    "amenity": "<text>",
    "location": "<text>",
    "cost": "<text with cost breakdown>",
    "similar_events": "<text>"
  },
  "strengths": ["<text>"],
  "considerations": ["<text>"]
}]}"#;

/// LLM-backed [`Synthesizer`].
pub struct VenueRecommender {
    model: Arc<dyn ChatModel>,
}

impl VenueRecommender {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

fn slot(text: &str) -> &str {
    if text.is_empty() {
        UNAVAILABLE
    } else {
        text
    }
}

fn user_prompt(input: &SynthesisInput<'_>) -> String {
    let requirements = serde_json::to_string_pretty(input.event).unwrap_or_default();
    format!(
        "**Event Requirements:**\n{requirements}\n\n\
         **Agent Analysis Results:**\n\n\
         **Capacity & Space Agent Analysis:**\n{}\n\n\
         **Amenity Matching Agent Analysis:**\n{}\n\n\
         **Location Agent Analysis:**\n{}\n\n\
         **Cost Analysis Agent Analysis:**\n{}\n\n\
         **Historical Similar Events:**\n{}\n\n\
         **Task:**\n\
         Review the analyses and similar events above and provide the top {} venue \
         recommendations, ranked from best to good. Include concrete numbers for every \
         dimension and the complete cost breakdown in dollars. Never mention scores or IDs.",
        slot(&input.capacity),
        slot(&input.amenity),
        slot(&input.location),
        slot(&input.cost),
        input.historical_context,
        input.top_n,
    )
}

#[async_trait]
impl Synthesizer for VenueRecommender {
    async fn synthesize(&self, input: &SynthesisInput<'_>) -> RoleResult<RecommendationSet> {
        complete_structured(
            self.model.as_ref(),
            "recommend",
            SYSTEM_PROMPT.to_string(),
            user_prompt(input),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PartialAnalyses;
    use venue_history::EventRequest;

    #[test]
    fn test_missing_slots_read_as_unavailable() {
        let event = EventRequest::from_json(serde_json::json!({"attendee_count": 100})).unwrap();
        let input = SynthesisInput::assemble(&event, &PartialAnalyses::default(), &[], 3);
        let prompt = user_prompt(&input);
        assert_eq!(prompt.matches(UNAVAILABLE).count(), 4);
        assert!(prompt.contains("top 3 venue"));
        assert!(prompt.contains("\"attendee_count\": 100"));
    }
}
