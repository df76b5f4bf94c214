//! Askama templates for the web frontend.

use askama::Template;
use chrono::Duration;

use crate::domain::{RouteEdge, TripCandidate};

// ============================================================================
// Fragment Templates (AJAX responses)
// ============================================================================

/// Trip results fragment.
#[derive(Template)]
#[template(path = "trip_results.html")]
pub struct TripResultsTemplate {
    pub trips: Vec<TripView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Trip view model for templates.
#[derive(Debug, Clone)]
pub struct TripView {
    /// e.g. "Station A → Station B → Station C"
    pub route: String,
    pub duration: String,
    pub cost: String,
    pub transfers: usize,
    pub transfer_time: String,
    pub legs: Vec<LegView>,
}

impl TripView {
    /// Create from a domain TripCandidate.
    pub fn from_trip(trip: &TripCandidate) -> Self {
        let stations = trip.stations();
        let legs = trip
            .edges()
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let from = stations.get(i).map(String::as_str).unwrap_or_default();
                let to = stations.get(i + 1).map(String::as_str).unwrap_or_default();
                LegView::from_edge(edge, from, to)
            })
            .collect();

        Self {
            route: stations.join(" → "),
            duration: format_duration(trip.total_time()),
            cost: format!("{:.2}", trip.total_cost()),
            transfers: trip.total_transfers(),
            transfer_time: format_duration(trip.total_transfer_time()),
            legs,
        }
    }

    /// "Direct", "1 change" or "N changes".
    pub fn transfers_summary(&self) -> String {
        match self.transfers {
            0 => "Direct".to_string(),
            1 => "1 change".to_string(),
            n => format!("{n} changes"),
        }
    }
}

/// Leg view model for templates.
#[derive(Debug, Clone)]
pub struct LegView {
    pub from: String,
    pub to: String,
    pub name: String,
    pub mode: String,
    pub class: String,
    pub duration: String,
    pub cost: String,
}

impl LegView {
    pub fn from_edge(edge: &RouteEdge, from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            name: edge.name().to_string(),
            mode: edge.mode().to_string(),
            class: edge.class().to_string(),
            duration: format_duration(edge.total_time()),
            cost: format!("{:.2}", edge.total_cost()),
        }
    }
}

/// Format a duration as "8h 05m", or "45m" when under an hour.
fn format_duration(duration: Duration) -> String {
    let total_mins = duration.num_minutes();
    let (hours, mins) = (total_mins / 60, total_mins % 60);
    if hours == 0 {
        format!("{mins}m")
    } else {
        format!("{hours}h {mins:02}m")
    }
}
