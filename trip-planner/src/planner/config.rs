//! Planner configuration.

use std::time::Duration;

use serde::Deserialize;

use super::search::HeuristicKind;

/// Configuration parameters for trip planning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Number of stations considered near the origin, and near the
    /// destination. Up to `nearest_k²` searches are run per plan.
    pub nearest_k: usize,

    /// Maximum number of trips to return.
    pub max_results: usize,

    /// Heuristic guiding each path search.
    pub heuristic: HeuristicKind,

    /// Maximum node expansions per search. `None` is unbounded.
    pub max_expansions: Option<usize>,

    /// Wall-clock budget for a whole plan (milliseconds).
    /// `None` disables the deadline.
    pub search_timeout_ms: Option<u64>,

    /// Run the station-pair searches on the rayon thread pool.
    pub parallel: bool,

    /// Drop trips that are dominated on every ranking criterion.
    pub pareto_only: bool,
}

impl PlannerConfig {
    /// Create a new configuration with the given station fan-out and
    /// result limit. Other fields take their defaults.
    pub fn new(nearest_k: usize, max_results: usize) -> Self {
        Self {
            nearest_k,
            max_results,
            ..Self::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: Option<usize>) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn with_search_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.search_timeout_ms = timeout_ms;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_pareto_only(mut self, pareto_only: bool) -> Self {
        self.pareto_only = pareto_only;
        self
    }

    /// Returns the search timeout as a Duration.
    pub fn search_timeout(&self) -> Option<Duration> {
        self.search_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            nearest_k: 3,
            max_results: 10,
            heuristic: HeuristicKind::Zero,
            max_expansions: Some(100_000),
            search_timeout_ms: Some(2_000),
            parallel: true,
            pareto_only: false,
        }
    }
}
