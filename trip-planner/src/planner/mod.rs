//! Trip planner using A* search.
//!
//! This module answers: "I'm here and want to be there - which trips
//! through the network should I take?"
//!
//! Each candidate (origin station, destination station) pair is searched
//! for its cheapest route, the route is summarised into a trip, and the
//! trips are ranked by total time, then cost, then transfers.

mod aggregate;
mod config;
mod nearest;
mod plan;
mod rank;
mod search;

pub use aggregate::{AggregateError, aggregate, aggregate_path};
pub use config::PlannerConfig;
pub use nearest::nearest_stations;
pub use plan::{Candidates, PlanError, PlanResult, TripPlanner, TripRequest};
pub use rank::{compare_trips, dominates, rank_trips, remove_dominated};
pub use search::{
    CancelToken, GreatCircleHeuristic, Heuristic, HeuristicKind, Path, PathOutcome, PathSearch,
    SearchError, SearchLimits, ZeroHeuristic,
};
