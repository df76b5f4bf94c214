//! Reduces found paths into trip summaries.

use crate::domain::{DomainError, RouteEdge, TripCandidate};
use crate::graph::{Graph, GraphError};

use super::search::Path;

/// Error turning a path into a trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Summarise an ordered sequence of edges.
///
/// Totals are plain sums over the edges; transfers are `edges - 1`.
/// An empty sequence is rejected with `DomainError::EmptyTrip`.
pub fn aggregate(edges: Vec<RouteEdge>) -> Result<TripCandidate, DomainError> {
    TripCandidate::from_edges(edges)
}

/// Look up the edges of a found path and summarise them, keeping the
/// station names for presentation.
pub fn aggregate_path(graph: &Graph, path: &Path) -> Result<TripCandidate, AggregateError> {
    let edges = path.edges(graph)?;
    let trip = aggregate(edges)?.with_stations(path.station_names(graph));
    Ok(trip)
}


#[cfg(test)]
mod proptests {
    use chrono::Duration;
    use proptest::prelude::*;

    use super::*;
    use crate::domain::{ServiceClass, TransportMode};

    fn edge_strategy() -> impl Strategy<Value = RouteEdge> {
        (0u32..500, 0i64..600, 0i64..60, 0i64..60, 0i64..30, 0i64..90).prop_map(
            |(cost, base, delay, transfer, stop, wait)| {
                RouteEdge::builder("e", TransportMode::Bus, ServiceClass::Economy)
                    .base_cost(f64::from(cost))
                    .base_time(Duration::minutes(base))
                    .average_delay(Duration::minutes(delay))
                    .transfer_time(Duration::minutes(transfer))
                    .stop_time(Duration::minutes(stop))
                    .expected_waiting(Duration::minutes(wait))
                    .build()
                    .unwrap()
            },
        )
    }

    proptest! {
        #[test]
        fn split_anywhere_is_additive(
            edges in prop::collection::vec(edge_strategy(), 2..8),
            split in 1usize..7,
        ) {
            let split = split.min(edges.len() - 1);
            let (head, tail) = edges.split_at(split);

            let whole = aggregate(edges.clone()).unwrap();
            let left = aggregate(head.to_vec()).unwrap();
            let right = aggregate(tail.to_vec()).unwrap();

            prop_assert_eq!(whole.total_time(), left.total_time() + right.total_time());
            prop_assert_eq!(whole.total_cost(), left.total_cost() + right.total_cost());
            prop_assert_eq!(
                whole.total_transfer_time(),
                left.total_transfer_time() + right.total_transfer_time()
            );
            // Joining two trips adds one change
            prop_assert_eq!(
                whole.total_transfers(),
                left.total_transfers() + right.total_transfers() + 1
            );
        }
    }
}
