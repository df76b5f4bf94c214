//! Route edges: directed connections between stations.
//!
//! A `RouteEdge` describes one ride (a train, a flight, a bus) between an
//! ordered pair of stations. It carries a money cost and several time
//! components that add up to the total travel time.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Means of transport for a route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Train,
    Bus,
    Plane,
    Ferry,
    Tram,
    Metro,
    Walk,
    Other(String),
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Train => f.write_str("train"),
            TransportMode::Bus => f.write_str("bus"),
            TransportMode::Plane => f.write_str("plane"),
            TransportMode::Ferry => f.write_str("ferry"),
            TransportMode::Tram => f.write_str("tram"),
            TransportMode::Metro => f.write_str("metro"),
            TransportMode::Walk => f.write_str("walk"),
            TransportMode::Other(name) => f.write_str(name),
        }
    }
}

/// Service class of a route (informational only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceClass {
    Economy,
    Comfort,
    Business,
    First,
    Other(String),
}

impl fmt::Display for ServiceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceClass::Economy => f.write_str("economy"),
            ServiceClass::Comfort => f.write_str("comfort"),
            ServiceClass::Business => f.write_str("business"),
            ServiceClass::First => f.write_str("first"),
            ServiceClass::Other(name) => f.write_str(name),
        }
    }
}

/// Converts a `Duration` to fractional hours.
pub fn as_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

/// An immutable directed edge with a composite cost and duration.
///
/// # Invariants
///
/// - `base_cost` is finite and non-negative
/// - every duration component is non-negative
///
/// Both are enforced by [`RouteEdgeBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEdge {
    name: String,
    mode: TransportMode,
    class: ServiceClass,
    base_cost: f64,
    base_time: Duration,
    average_delay: Duration,
    transfer_time: Duration,
    stop_time: Duration,
    expected_waiting: Duration,
}

impl RouteEdge {
    /// Start building an edge. All numeric fields default to zero.
    pub fn builder(
        name: impl Into<String>,
        mode: TransportMode,
        class: ServiceClass,
    ) -> RouteEdgeBuilder {
        RouteEdgeBuilder {
            name: name.into(),
            mode,
            class,
            base_cost: 0.0,
            base_time: Duration::zero(),
            average_delay: Duration::zero(),
            transfer_time: Duration::zero(),
            stop_time: Duration::zero(),
            expected_waiting: Duration::zero(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> &TransportMode {
        &self.mode
    }

    pub fn class(&self) -> &ServiceClass {
        &self.class
    }

    pub fn base_cost(&self) -> f64 {
        self.base_cost
    }

    pub fn base_time(&self) -> Duration {
        self.base_time
    }

    pub fn average_delay(&self) -> Duration {
        self.average_delay
    }

    pub fn transfer_time(&self) -> Duration {
        self.transfer_time
    }

    pub fn stop_time(&self) -> Duration {
        self.stop_time
    }

    pub fn expected_waiting(&self) -> Duration {
        self.expected_waiting
    }

    /// Money cost of taking this edge. Used as the search weight.
    pub fn total_cost(&self) -> f64 {
        self.base_cost
    }

    /// Riding time plus stops, delay, waiting and transfer.
    pub fn total_time(&self) -> Duration {
        self.base_time
            + self.stop_time
            + self.average_delay
            + self.expected_waiting
            + self.transfer_time
    }
}

/// Builder for [`RouteEdge`].
#[derive(Debug, Clone)]
pub struct RouteEdgeBuilder {
    name: String,
    mode: TransportMode,
    class: ServiceClass,
    base_cost: f64,
    base_time: Duration,
    average_delay: Duration,
    transfer_time: Duration,
    stop_time: Duration,
    expected_waiting: Duration,
}

impl RouteEdgeBuilder {
    pub fn base_cost(mut self, cost: f64) -> Self {
        self.base_cost = cost;
        self
    }

    pub fn base_time(mut self, duration: Duration) -> Self {
        self.base_time = duration;
        self
    }

    pub fn average_delay(mut self, duration: Duration) -> Self {
        self.average_delay = duration;
        self
    }

    pub fn transfer_time(mut self, duration: Duration) -> Self {
        self.transfer_time = duration;
        self
    }

    pub fn stop_time(mut self, duration: Duration) -> Self {
        self.stop_time = duration;
        self
    }

    pub fn expected_waiting(mut self, duration: Duration) -> Self {
        self.expected_waiting = duration;
        self
    }

    /// Validate and build the edge.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCost` for a negative or non-finite cost and
    /// `NegativeValue` naming the first negative duration field.
    pub fn build(self) -> Result<RouteEdge, DomainError> {
        if !self.base_cost.is_finite() || self.base_cost < 0.0 {
            return Err(DomainError::InvalidCost(self.base_cost));
        }

        let durations = [
            ("base_time", self.base_time),
            ("average_delay", self.average_delay),
            ("transfer_time", self.transfer_time),
            ("stop_time", self.stop_time),
            ("expected_waiting", self.expected_waiting),
        ];
        if let Some((field, _)) = durations.into_iter().find(|(_, d)| *d < Duration::zero()) {
            return Err(DomainError::NegativeValue { field });
        }

        Ok(RouteEdge {
            name: self.name,
            mode: self.mode,
            class: self.class,
            base_cost: self.base_cost,
            base_time: self.base_time,
            average_delay: self.average_delay,
            transfer_time: self.transfer_time,
            stop_time: self.stop_time,
            expected_waiting: self.expected_waiting,
        })
    }
}
