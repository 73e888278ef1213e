//! Request-derived search query and metadata filter.

use serde_json::Value;

use crate::document::DocumentMetadata;
use crate::event::{EventRequest, RecordFields};

/// Minimum capacity tolerance, in attendees.
const MIN_CAPACITY_TOLERANCE: u64 = 50;

/// Query text for similarity search.
pub fn build_query(event: &EventRequest) -> String {
    let location_requirements = event
        .get("location_requirements")
        .map(|v| v.to_string())
        .unwrap_or_default();

    let lines = [
        ("Event ID", event.text("event_id")),
        ("Event Name", event.text("event_name")),
        ("Event Type", event.text("event_type")),
        ("Attendee Count", event.text("attendee_count")),
        ("Client Name", event.text("client_name")),
        ("Location", event.text("location_preference")),
        ("Location Requirements", location_requirements),
        ("Key Requirements", event.str_list("key_requirements").join(", ")),
        ("Required Amenities", event.str_list("required_amenities").join(", ")),
        ("Preferred Amenities", event.str_list("preferred_amenities").join(", ")),
        ("Event Style", event.text("event_style")),
        ("Special Requirements", event.str_list("special_requirements").join(", ")),
        ("Client Preferences", event.str_list("client_preferences").join(", ")),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Metadata constraints applied before ranking.
///
/// A document passes when *any* clause matches; a filter without clauses
/// passes everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    /// Inclusive `venue.max_capacity` window.
    pub capacity_range: Option<(u64, u64)>,
    /// Prefixes matched against `venue.city`.
    pub city_prefixes: Vec<String>,
}

impl SearchFilter {
    pub fn from_event(event: &EventRequest) -> Self {
        let capacity_range = event
            .u64_field("attendee_count")
            .filter(|count| *count > 0)
            .map(|count| {
                let tolerance = (count / 5).max(MIN_CAPACITY_TOLERANCE);
                (count.saturating_sub(tolerance), count.saturating_add(tolerance))
            });

        let city_prefixes = match event.get("location_requirements") {
            Some(Value::Object(reqs)) => match reqs.get("cities") {
                Some(Value::Array(cities)) => cities
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|city| city.split(',').next().unwrap_or(city).trim().to_string())
                    .filter(|city| !city.is_empty())
                    .collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Self {
            capacity_range,
            city_prefixes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.capacity_range.is_none() && self.city_prefixes.is_empty()
    }

    pub fn matches(&self, metadata: &DocumentMetadata) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(venue) = metadata.venue.as_ref() else {
            return false;
        };

        let capacity_ok = self.capacity_range.is_some_and(|(low, high)| {
            venue
                .u64_field("max_capacity")
                .is_some_and(|cap| (low..=high).contains(&cap))
        });

        let city_ok = venue.str_field("city").is_some_and(|city| {
            self.city_prefixes
                .iter()
                .any(|prefix| city.starts_with(prefix.as_str()))
        });

        capacity_ok || city_ok
    }
}
