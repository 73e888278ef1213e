//! Language-model implementations of the analyst and synthesizer seams.
//!
//! Each agent formats the event and venue records into a prompt, asks the
//! [`ChatModel`] for JSON, and parses the reply into the typed analysis.

mod amenity;
mod capacity;
mod cost;
mod location;
mod prompt;
mod recommend;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;
use venue_llm::{parse_structured, ChatModel, ChatRequest};

use crate::role_orchestration::error::RoleResult;
use crate::role_orchestration::roles::AnalystSet;

pub use amenity::AmenityAnalyst;
pub use capacity::CapacityAnalyst;
pub use cost::CostAnalyst;
pub use location::LocationAnalyst;
pub use recommend::VenueRecommender;

/// All four analysts backed by the same model.
pub fn llm_analysts(model: Arc<dyn ChatModel>) -> AnalystSet {
    AnalystSet {
        capacity: Arc::new(CapacityAnalyst::new(Arc::clone(&model))),
        amenity: Arc::new(AmenityAnalyst::new(Arc::clone(&model))),
        location: Arc::new(LocationAnalyst::new(Arc::clone(&model))),
        cost: Arc::new(CostAnalyst::new(model)),
    }
}

/// Send one exchange and parse the JSON reply as `T`.
pub(crate) async fn complete_structured<T: DeserializeOwned>(
    model: &dyn ChatModel,
    agent: &str,
    system: String,
    user: String,
) -> RoleResult<T> {
    let request = ChatRequest::new(system, user);
    let reply = model.complete(&request).await?;
    debug!(agent, model = model.model_name(), reply_len = reply.len(), "completion received");
    Ok(parse_structured(&reply)?)
}
