//! Trip candidates.
//!
//! A `TripCandidate` summarises one complete path through the network:
//! the edges ridden, the stations visited, and the totals used for ranking.

use chrono::Duration;

use super::{DomainError, RouteEdge};

/// The aggregated summary of one complete path.
///
/// # Invariants
///
/// - At least one edge
/// - `stations.len() == edges.len() + 1` when station names are attached
/// - Totals are consistent with `edges`
///
/// Fields are private so a candidate cannot change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCandidate {
    total_time: Duration,
    total_cost: f64,
    total_transfers: usize,
    total_transfer_time: Duration,
    edges: Vec<RouteEdge>,
    stations: Vec<String>,
}

impl TripCandidate {
    /// Summarise an ordered sequence of edges.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyTrip` if `edges` is empty.
    pub fn from_edges(edges: Vec<RouteEdge>) -> Result<Self, DomainError> {
        if edges.is_empty() {
            return Err(DomainError::EmptyTrip);
        }

        let total_time = edges
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.total_time());
        let total_cost = edges.iter().map(RouteEdge::total_cost).sum();
        let total_transfer_time = edges
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.transfer_time());

        Ok(Self {
            total_time,
            total_cost,
            total_transfers: edges.len() - 1,
            total_transfer_time,
            edges,
            stations: Vec::new(),
        })
    }

    /// Attach the names of the visited stations, start to goal inclusive.
    pub fn with_stations(mut self, stations: Vec<String>) -> Self {
        self.stations = stations;
        self
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Number of changes between edges (edge count minus one).
    pub fn total_transfers(&self) -> usize {
        self.total_transfers
    }

    pub fn total_transfer_time(&self) -> Duration {
        self.total_transfer_time
    }

    pub fn edges(&self) -> &[RouteEdge] {
        &self.edges
    }

    /// Station names visited, or empty if none were attached.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    /// Origin station name, if station names were attached.
    pub fn origin(&self) -> Option<&str> {
        self.stations.first().map(String::as_str)
    }

    /// Destination station name, if station names were attached.
    pub fn destination(&self) -> Option<&str> {
        self.stations.last().map(String::as_str)
    }

    /// Returns true for a single-edge trip.
    pub fn is_direct(&self) -> bool {
        self.total_transfers == 0
    }

    /// Ranking key: time, then cost, then transfers, then transfer time.
    pub(crate) fn rank_key(&self) -> (Duration, f64, usize, Duration) {
        (
            self.total_time,
            self.total_cost,
            self.total_transfers,
            self.total_transfer_time,
        )
    }
}
