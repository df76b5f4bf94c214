//! Trip ranking for plan results.
//!
//! Orders trips so the most useful options come first, and optionally
//! prunes trips that another trip beats on every criterion.

use std::cmp::Ordering;

use crate::domain::TripCandidate;

/// Compare two trips by ranking priority.
///
/// 1. Total time (shorter is better)
/// 2. Total cost (cheaper is better)
/// 3. Number of transfers (fewer is better)
/// 4. Total transfer time (shorter is better)
pub fn compare_trips(a: &TripCandidate, b: &TripCandidate) -> Ordering {
    a.total_time()
        .cmp(&b.total_time())
        .then_with(|| a.total_cost().total_cmp(&b.total_cost()))
        .then_with(|| a.total_transfers().cmp(&b.total_transfers()))
        .then_with(|| a.total_transfer_time().cmp(&b.total_transfer_time()))
}

/// Rank trips by preference.
///
/// The sort is stable: trips equal on every criterion keep their input
/// order. Returns trips sorted best-first.
pub fn rank_trips(mut trips: Vec<TripCandidate>) -> Vec<TripCandidate> {
    trips.sort_by(compare_trips);
    trips
}

/// Returns true if `a` is at least as good as `b` on every criterion and
/// strictly better on one.
pub fn dominates(a: &TripCandidate, b: &TripCandidate) -> bool {
    let (a_time, a_cost, a_transfers, a_transfer_time) = a.rank_key();
    let (b_time, b_cost, b_transfers, b_transfer_time) = b.rank_key();

    a_time <= b_time
        && a_cost <= b_cost
        && a_transfers <= b_transfers
        && a_transfer_time <= b_transfer_time
        // Must be strictly better in at least one dimension
        && (a_time < b_time
            || a_cost < b_cost
            || a_transfers < b_transfers
            || a_transfer_time < b_transfer_time)
}

/// Remove dominated trips.
///
/// A trip is dominated if another trip is no worse on time, cost,
/// transfers and transfer time, and strictly better on at least one.
/// Keeps the Pareto front in input order.
pub fn remove_dominated(trips: Vec<TripCandidate>) -> Vec<TripCandidate> {
    if trips.len() <= 1 {
        return trips;
    }

    let mut result: Vec<TripCandidate> = Vec::with_capacity(trips.len());

    for trip in trips {
        if result.iter().any(|existing| dominates(existing, &trip)) {
            continue;
        }
        // Also remove any kept trips dominated by this one
        result.retain(|existing| !dominates(&trip, existing));
        result.push(trip);
    }

    result
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::domain::{RouteEdge, ServiceClass, TransportMode};

    fn leg(name: &str, cost: f64, mins: i64, transfer_mins: i64) -> RouteEdge {
        RouteEdge::builder(name, TransportMode::Train, ServiceClass::Economy)
            .base_cost(cost)
            .base_time(Duration::minutes(mins))
            .transfer_time(Duration::minutes(transfer_mins))
            .build()
            .unwrap()
    }

    fn trip(legs: &[(f64, i64, i64)]) -> TripCandidate {
        let edges = legs
            .iter()
            .enumerate()
            .map(|(i, (cost, mins, transfer))| leg(&format!("L{i}"), *cost, *mins, *transfer))
            .collect();
        TripCandidate::from_edges(edges).unwrap()
    }

    #[test]
    fn rank_by_time() {
        let slow = trip(&[(10.0, 120, 0)]);
        let fast = trip(&[(50.0, 60, 0)]);

        let ranked = rank_trips(vec![slow, fast]);

        assert_eq!(ranked[0].total_time(), Duration::minutes(60));
        assert_eq!(ranked[1].total_time(), Duration::minutes(120));
    }

    #[test]
    fn rank_by_cost_when_same_time() {
        let expensive = trip(&[(300.0, 60, 0)]);
        let cheap = trip(&[(250.0, 60, 0)]);

        let ranked = rank_trips(vec![expensive, cheap]);

        assert_eq!(ranked[0].total_cost(), 250.0);
        assert_eq!(ranked[1].total_cost(), 300.0);
    }

    #[test]
    fn rank_by_transfers_when_same_time_and_cost() {
        let changing = trip(&[(50.0, 30, 0), (50.0, 30, 0)]);
        let direct = trip(&[(100.0, 60, 0)]);

        let ranked = rank_trips(vec![changing, direct]);

        assert_eq!(ranked[0].total_transfers(), 0);
        assert_eq!(ranked[1].total_transfers(), 1);
    }

    #[test]
    fn rank_by_transfer_time_last() {
        // Same totals, but one spends more of it changing
        let long_change = trip(&[(50.0, 10, 20), (50.0, 30, 0)]);
        let short_change = trip(&[(50.0, 20, 10), (50.0, 30, 0)]);

        let ranked = rank_trips(vec![long_change, short_change]);

        assert_eq!(ranked[0].total_transfer_time(), Duration::minutes(10));
        assert_eq!(ranked[1].total_transfer_time(), Duration::minutes(20));
    }

    #[test]
    fn rank_is_stable_for_equal_keys() {
        let first = trip(&[(10.0, 60, 0)]).with_stations(vec!["X".into(), "Y".into()]);
        let second = trip(&[(10.0, 60, 0)]).with_stations(vec!["P".into(), "Q".into()]);

        let ranked = rank_trips(vec![first, second]);

        assert_eq!(ranked[0].origin(), Some("X"));
        assert_eq!(ranked[1].origin(), Some("P"));
    }

    #[test]
    fn remove_dominated_keeps_pareto_optimal() {
        // A: 60 min, 100. B: 90 min, 120 (dominated by A). C: 45 min, 200.
        let a = trip(&[(100.0, 60, 0)]);
        let b = trip(&[(120.0, 90, 0)]);
        let c = trip(&[(200.0, 45, 0)]);

        let result = remove_dominated(vec![a, b, c]);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.total_cost() != 120.0));
    }

    #[test]
    fn remove_dominated_drops_earlier_kept_trip() {
        let worse = trip(&[(100.0, 90, 0)]);
        let better = trip(&[(100.0, 60, 0)]);

        let result = remove_dominated(vec![worse, better]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total_time(), Duration::minutes(60));
    }

    #[test]
    fn equal_trips_do_not_dominate() {
        let a = trip(&[(10.0, 60, 0)]);
        let b = trip(&[(10.0, 60, 0)]);

        assert!(!dominates(&a, &b));
        assert_eq!(remove_dominated(vec![a, b]).len(), 2);
    }

    #[test]
    fn empty_input() {
        assert!(rank_trips(vec![]).is_empty());
        assert!(remove_dominated(vec![]).is_empty());
    }
}
