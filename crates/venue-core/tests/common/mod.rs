//! Stub analysts, synthesizers and fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::Instant;
use venue_core::domain::{
    AmenityAssessment, CapacityAssessment, CostAssessment, LocationAssessment,
    VenueAmenityAnalysis, VenueCapacityAnalysis, VenueCostAnalysis, VenueLocationAnalysis,
    Verdict,
};
use venue_core::{
    AnalysisKind, AnalysisOutput, Analyst, AnalystSet, DimensionNarrative, RecommendationSet,
    RoleError, RoleResult, SynthesisInput, Synthesizer, VenueRecommendation,
};
use venue_history::{DocumentMetadata, EventRequest, RetrievedDocument, VenueRecord};

fn verdict() -> Verdict {
    Verdict {
        recommend: true,
        pros: "solid".to_string(),
        cons: String::new(),
    }
}

/// A valid output of `kind` with one assessment per venue.
pub fn output_for(kind: AnalysisKind, venues: &[VenueRecord], score: u32) -> AnalysisOutput {
    let id = |v: &VenueRecord| v.venue_id().unwrap_or_default().to_string();
    match kind {
        AnalysisKind::Capacity => AnalysisOutput::Capacity(VenueCapacityAnalysis {
            capacity_analysis: venues
                .iter()
                .map(|v| CapacityAssessment {
                    score,
                    analysis: "fits".to_string(),
                    venue_name: v.name().to_string(),
                    venue_id: id(v),
                    capacity_suitable: true,
                    capacity_utilization: 0.8,
                    meeting_rooms_sufficient: true,
                    space_adequacy: "good".to_string(),
                    recommendations: verdict(),
                })
                .collect(),
        }),
        AnalysisKind::Amenity => AnalysisOutput::Amenity(VenueAmenityAnalysis {
            venue_amenity_analysis: venues
                .iter()
                .map(|v| AmenityAssessment {
                    score,
                    analysis: "well equipped".to_string(),
                    venue_name: v.name().to_string(),
                    venue_id: id(v),
                    required_amenities_match: true,
                    missing_amenities: vec![],
                    available_amenities: vec!["wifi".to_string()],
                    special_requirements_status: "met".to_string(),
                    recommendation: verdict(),
                })
                .collect(),
        }),
        AnalysisKind::Location => AnalysisOutput::Location(VenueLocationAnalysis {
            location_analysis: venues
                .iter()
                .map(|v| LocationAssessment {
                    score,
                    analysis: "central".to_string(),
                    venue_name: v.name().to_string(),
                    venue_id: id(v),
                    location_match: true,
                    region_match: true,
                    accessibility_score: 0.9,
                    nearby_accommodations: 12,
                    recommendations: verdict(),
                })
                .collect(),
        }),
        AnalysisKind::Cost => AnalysisOutput::Cost(VenueCostAnalysis {
            cost_analysis: venues
                .iter()
                .map(|_| CostAssessment {
                    score,
                    analysis: "within budget".to_string(),
                    budget_met: true,
                    estimated_total_cost: 42_000.0,
                    cost_breakdown: Default::default(),
                    value_assessment: "good".to_string(),
                    hidden_costs: vec![],
                    recommendation: verdict(),
                })
                .collect(),
        }),
    }
}

/// Analyst that fails its first `failures` calls, then succeeds.
///
/// Each call sleeps for `delay` on the tokio clock first.
pub struct StubAnalyst {
    kind: AnalysisKind,
    failures: usize,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<Vec<String>>>,
    finished: Mutex<Vec<Instant>>,
}

impl StubAnalyst {
    pub fn ok(kind: AnalysisKind) -> Arc<Self> {
        Self::failing_first(kind, 0)
    }

    pub fn always_failing(kind: AnalysisKind) -> Arc<Self> {
        Self::failing_first(kind, usize::MAX)
    }

    pub fn failing_first(kind: AnalysisKind, failures: usize) -> Arc<Self> {
        Self::slow(kind, failures, Duration::ZERO)
    }

    pub fn slow(kind: AnalysisKind, failures: usize, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            kind,
            failures,
            delay,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            finished: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Venue ids received per call.
    pub fn seen_venues(&self) -> Vec<Vec<String>> {
        self.seen.lock().unwrap().clone()
    }

    /// When each call returned.
    pub fn finished_at(&self) -> Vec<Instant> {
        self.finished.lock().unwrap().clone()
    }
}

#[async_trait]
impl Analyst for StubAnalyst {
    async fn analyze(
        &self,
        _event: &EventRequest,
        venues: &[VenueRecord],
        _documents: &[RetrievedDocument],
    ) -> RoleResult<AnalysisOutput> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(
            venues
                .iter()
                .map(|v| v.venue_id().unwrap_or_default().to_string())
                .collect(),
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.finished.lock().unwrap().push(Instant::now());

        if call < self.failures {
            return Err(RoleError::analyst_failed(self.kind, "stubbed failure"));
        }
        Ok(output_for(self.kind, venues, 80))
    }
}

/// The four stubs plus the set built from them.
pub struct Stubs {
    pub capacity: Arc<StubAnalyst>,
    pub amenity: Arc<StubAnalyst>,
    pub location: Arc<StubAnalyst>,
    pub cost: Arc<StubAnalyst>,
}

impl Stubs {
    pub fn new(
        capacity: Arc<StubAnalyst>,
        amenity: Arc<StubAnalyst>,
        location: Arc<StubAnalyst>,
        cost: Arc<StubAnalyst>,
    ) -> Self {
        Self {
            capacity,
            amenity,
            location,
            cost,
        }
    }

    pub fn all_ok() -> Self {
        Self::new(
            StubAnalyst::ok(AnalysisKind::Capacity),
            StubAnalyst::ok(AnalysisKind::Amenity),
            StubAnalyst::ok(AnalysisKind::Location),
            StubAnalyst::ok(AnalysisKind::Cost),
        )
    }

    pub fn all_failing() -> Self {
        Self::new(
            StubAnalyst::always_failing(AnalysisKind::Capacity),
            StubAnalyst::always_failing(AnalysisKind::Amenity),
            StubAnalyst::always_failing(AnalysisKind::Location),
            StubAnalyst::always_failing(AnalysisKind::Cost),
        )
    }

    pub fn set(&self) -> AnalystSet {
        AnalystSet {
            capacity: self.capacity.clone(),
            amenity: self.amenity.clone(),
            location: self.location.clone(),
            cost: self.cost.clone(),
        }
    }

    pub fn calls(&self) -> [usize; 4] {
        [
            self.capacity.calls(),
            self.amenity.calls(),
            self.location.calls(),
            self.cost.calls(),
        ]
    }
}

/// Snapshot of one synthesis call.
#[derive(Debug, Clone)]
pub struct SeenInput {
    pub slots: [String; 4],
    pub historical_context: String,
    pub top_n: usize,
}

/// Synthesizer returning three ranked venues, or failing.
#[derive(Default)]
pub struct StubSynthesizer {
    fail: bool,
    inputs: Mutex<Vec<SeenInput>>,
}

impl StubSynthesizer {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }

    pub fn inputs(&self) -> Vec<SeenInput> {
        self.inputs.lock().unwrap().clone()
    }
}

pub fn recommendation(id: &str, ranking: u32) -> VenueRecommendation {
    VenueRecommendation {
        venue_id: id.to_string(),
        venue_name: format!("Venue {id}"),
        ranking,
        estimated_cost: 45_000,
        analysis: DimensionNarrative {
            capacity: "100 of 120 seats used".to_string(),
            amenity: "all required amenities on site".to_string(),
            location: "8 hotels nearby".to_string(),
            cost: "Venue rental $20,000, catering $25,000".to_string(),
            similar_events: "2 similar events rated 4.6".to_string(),
        },
        strengths: vec!["layout".to_string()],
        considerations: vec!["parking".to_string()],
    }
}

#[async_trait]
impl Synthesizer for StubSynthesizer {
    async fn synthesize(&self, input: &SynthesisInput<'_>) -> RoleResult<RecommendationSet> {
        self.inputs.lock().unwrap().push(SeenInput {
            slots: [
                input.capacity.clone(),
                input.amenity.clone(),
                input.location.clone(),
                input.cost.clone(),
            ],
            historical_context: input.historical_context.clone(),
            top_n: input.top_n,
        });
        if self.fail {
            return Err(RoleError::analyst_failed("synthesis", "stubbed failure"));
        }
        Ok(RecommendationSet {
            recommendations: vec![
                recommendation("V1", 1),
                recommendation("V2", 2),
                recommendation("V3", 3),
            ],
        })
    }
}

pub fn venue(id: &str, name: &str) -> VenueRecord {
    VenueRecord::from_json(json!({"venue_id": id, "name": name, "max_capacity": 120})).unwrap()
}

pub fn document(content: &str, venue: Option<VenueRecord>) -> RetrievedDocument {
    RetrievedDocument::new(
        content,
        DocumentMetadata {
            venue,
            ..Default::default()
        },
    )
}

/// Two documents for V1 (different records) and one for V2.
pub fn documents() -> Vec<RetrievedDocument> {
    vec![
        document("Event ID: H1", Some(venue("V1", "Riverside Center"))),
        document("Event ID: H2", Some(venue("V1", "Riverside Center (renamed)"))),
        document("Event ID: H3", Some(venue("V2", "Grand Hall"))),
    ]
}

pub fn event() -> EventRequest {
    EventRequest::from_json(json!({
        "event_id": "EVT-2026-028",
        "attendee_count": 100,
        "budget": 50000
    }))
    .unwrap()
}
