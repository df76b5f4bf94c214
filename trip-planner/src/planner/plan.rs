//! Trip planning between two coordinates.
//!
//! The planner picks the stations nearest the origin and the destination,
//! searches every (origin station, destination station) pair, and ranks
//! the trips that were found. Each pair search owns its scratch state, so
//! the pairs run in parallel on the rayon pool when configured to.

use std::time::Instant;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{Location, TripCandidate};
use crate::graph::{Graph, NodeId};

use super::aggregate::{AggregateError, aggregate_path};
use super::config::PlannerConfig;
use super::nearest::nearest_stations;
use super::rank::{rank_trips, remove_dominated};
use super::search::{CancelToken, PathOutcome, PathSearch, SearchError, SearchLimits};

/// Error from trip planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("network has no stations")]
    NoStations,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Every station pair was unreachable
    #[error("no route found")]
    NoRouteFound,

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Where the traveller starts and where they want to go.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TripRequest {
    pub origin: Location,
    pub destination: Location,
}

impl TripRequest {
    pub fn new(origin: Location, destination: Location) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Ranked trips plus some accounting of the work done.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Best trip first
    pub trips: Vec<TripCandidate>,

    /// Station pairs a search was run for
    pub pairs_searched: usize,

    /// Pairs skipped because both ends were the same station
    pub pairs_skipped: usize,

    /// Searched pairs with no connecting route
    pub pairs_unreachable: usize,

    /// Searched pairs that hit the expansion limit or the deadline
    pub pairs_aborted: usize,

    /// Nodes expanded across every search that found a path
    pub nodes_expanded: usize,
}

/// What happened to one station pair.
enum PairOutcome {
    SameStation,
    Unreachable,
    Aborted(SearchError),
    Trip { trip: TripCandidate, expanded: usize },
}

/// Stations near the origin and near the destination, nearest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidates {
    pub origins: Vec<NodeId>,
    pub destinations: Vec<NodeId>,
}

/// Plans trips over a borrowed network.
#[derive(Debug, Clone)]
pub struct TripPlanner<'a> {
    graph: &'a Graph,
    config: &'a PlannerConfig,
    cancel: Option<CancelToken>,
}

impl<'a> TripPlanner<'a> {
    pub fn new(graph: &'a Graph, config: &'a PlannerConfig) -> Self {
        Self {
            graph,
            config,
            cancel: None,
        }
    }

    /// Abort every pair search once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The stations searched from and to for a request, nearest first.
    ///
    /// Two requests with equal candidates produce equal plans.
    pub fn candidates(&self, request: &TripRequest) -> Result<Candidates, PlanError> {
        if self.graph.is_empty() {
            return Err(PlanError::NoStations);
        }
        if self.config.nearest_k == 0 {
            return Err(PlanError::InvalidRequest(
                "nearest_k must be at least 1".to_string(),
            ));
        }

        let stations = self.graph.stations();
        Ok(Candidates {
            origins: nearest_stations(stations, &request.origin, self.config.nearest_k),
            destinations: nearest_stations(stations, &request.destination, self.config.nearest_k),
        })
    }

    /// Plan trips for a request.
    pub fn plan(&self, request: &TripRequest) -> Result<PlanResult, PlanError> {
        let candidates = self.candidates(request)?;
        self.plan_between(&candidates)
    }

    /// Plan trips between every origin and destination candidate.
    ///
    /// Unreachable pairs are not errors, and neither are pairs whose search
    /// ran out of expansions or time: both are counted and left out. The
    /// plan fails only if no pair yields a trip, or on a graph error or
    /// cancellation.
    pub fn plan_between(&self, candidates: &Candidates) -> Result<PlanResult, PlanError> {
        let config = self.config;
        let starts = &candidates.origins;
        let ends = &candidates.destinations;
        let pairs: Vec<(NodeId, NodeId)> = starts
            .iter()
            .flat_map(|&start| ends.iter().map(move |&end| (start, end)))
            .collect();

        info!(
            origin_candidates = starts.len(),
            destination_candidates = ends.len(),
            pairs = pairs.len(),
            parallel = config.parallel,
            "planning trip"
        );

        let limits = SearchLimits {
            max_expansions: config.max_expansions,
            deadline: config.search_timeout().map(|t| Instant::now() + t),
            cancel: self.cancel.clone(),
        };
        let search = PathSearch::new(self.graph)
            .with_heuristic(config.heuristic)
            .with_limits(limits);

        let run = |&(start, end): &(NodeId, NodeId)| -> Result<PairOutcome, PlanError> {
            if start == end {
                return Ok(PairOutcome::SameStation);
            }
            match search.search(start, end) {
                Ok(PathOutcome::Unreachable) => Ok(PairOutcome::Unreachable),
                Err(e @ (SearchError::ExpansionLimit(_) | SearchError::Timeout)) => {
                    warn!(start = start.0, end = end.0, error = %e, "pair search aborted");
                    Ok(PairOutcome::Aborted(e))
                }
                Err(e) => Err(e.into()),
                Ok(PathOutcome::Found(path)) => {
                    let trip = aggregate_path(self.graph, &path)?;
                    Ok(PairOutcome::Trip {
                        trip,
                        expanded: path.expanded(),
                    })
                }
            }
        };

        // Collecting preserves pair order in both modes, so ranking ties
        // resolve the same way either way.
        let outcomes: Vec<PairOutcome> = if config.parallel {
            pairs.par_iter().map(run).collect::<Result<_, _>>()?
        } else {
            pairs.iter().map(run).collect::<Result<_, _>>()?
        };

        let mut result = PlanResult {
            trips: Vec::new(),
            pairs_searched: 0,
            pairs_skipped: 0,
            pairs_unreachable: 0,
            pairs_aborted: 0,
            nodes_expanded: 0,
        };
        let mut first_abort = None;
        for outcome in outcomes {
            match outcome {
                PairOutcome::SameStation => result.pairs_skipped += 1,
                PairOutcome::Unreachable => {
                    result.pairs_searched += 1;
                    result.pairs_unreachable += 1;
                }
                PairOutcome::Aborted(e) => {
                    result.pairs_searched += 1;
                    result.pairs_aborted += 1;
                    first_abort.get_or_insert(e);
                }
                PairOutcome::Trip { trip, expanded } => {
                    result.pairs_searched += 1;
                    result.nodes_expanded += expanded;
                    result.trips.push(trip);
                }
            }
        }

        if result.trips.is_empty() {
            info!(
                searched = result.pairs_searched,
                unreachable = result.pairs_unreachable,
                aborted = result.pairs_aborted,
                "no route found"
            );
            // Report the budget that ran out rather than claim no route exists
            return Err(first_abort.map_or(PlanError::NoRouteFound, PlanError::Search));
        }

        let mut trips = std::mem::take(&mut result.trips);
        if config.pareto_only {
            let before = trips.len();
            trips = remove_dominated(trips);
            debug!(before, after = trips.len(), "removed dominated trips");
        }
        let mut trips = rank_trips(trips);
        trips.truncate(config.max_results);
        result.trips = trips;

        info!(
            trips = result.trips.len(),
            searched = result.pairs_searched,
            unreachable = result.pairs_unreachable,
            aborted = result.pairs_aborted,
            expanded = result.nodes_expanded,
            "plan complete"
        );
        Ok(result)
    }
}
