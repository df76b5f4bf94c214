//! Fluent construction of transport networks.

use chrono::Duration;

use crate::domain::{Location, RouteEdge, RouteEdgeBuilder, ServiceClass, TransportMode};

use super::{DuplicatePolicy, Graph, GraphError};

/// Builder for creating a [`Graph`].
///
/// Registration errors are deferred: the first one is kept and returned
/// by [`build`](Self::build), and later calls become no-ops.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: Graph,
    error: Option<GraphError>,
}

impl NetworkBuilder {
    /// Create a new builder with the default (overwrite) policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that rejects duplicate stations and routes.
    pub fn strict() -> Self {
        Self {
            inner: Graph::with_policy(DuplicatePolicy::Reject),
            error: None,
        }
    }

    /// Add a station.
    pub fn station(mut self, name: &str, latitude: f64, longitude: f64) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.inner.add_node(name, Location::new(latitude, longitude)) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Add a directed route from a partially configured edge builder.
    pub fn route(mut self, from: &str, to: &str, edge: RouteEdgeBuilder) -> Self {
        if self.error.is_none() {
            let result = edge
                .build()
                .map_err(GraphError::from)
                .and_then(|edge| self.inner.add_edge(from, to, edge));
            if let Err(e) = result {
                self.error = Some(e);
            }
        }
        self
    }

    /// Add an already-validated edge.
    pub fn edge(mut self, from: &str, to: &str, edge: RouteEdge) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.inner.add_edge(from, to, edge) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Build the graph, or return the first registration error.
    pub fn build(self) -> Result<Graph, GraphError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.inner),
        }
    }
}

/// The three-station demonstration network.
///
/// New York, Los Angeles and London, with two economy trains chained
/// through Los Angeles and a direct business flight. The chained trains
/// are cheaper (250 vs 300) but slower (15h vs 13h).
pub fn reference_network() -> Result<Graph, GraphError> {
    NetworkBuilder::new()
        .station("Station A", 40.7128, -74.0060)
        .station("Station B", 34.0522, -118.2437)
        .station("Station C", 51.5074, -0.1278)
        .route(
            "Station A",
            "Station B",
            RouteEdge::builder("Train A-B", TransportMode::Train, ServiceClass::Economy)
                .base_cost(100.0)
                .base_time(Duration::hours(6))
                .average_delay(Duration::hours(1))
                .stop_time(Duration::hours(1)),
        )
        .route(
            "Station B",
            "Station C",
            RouteEdge::builder("Train B-C", TransportMode::Train, ServiceClass::Economy)
                .base_cost(150.0)
                .base_time(Duration::hours(5))
                .transfer_time(Duration::hours(1))
                .stop_time(Duration::hours(1)),
        )
        .route(
            "Station A",
            "Station C",
            RouteEdge::builder("Flight A-C", TransportMode::Plane, ServiceClass::Business)
                .base_cost(300.0)
                .base_time(Duration::hours(10))
                .average_delay(Duration::hours(2))
                .expected_waiting(Duration::hours(1)),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn bus(name: &str) -> RouteEdgeBuilder {
        RouteEdge::builder(name, TransportMode::Bus, ServiceClass::Economy).base_cost(1.0)
    }

    #[test]
    fn builder() {
        let graph = NetworkBuilder::new()
            .station("A", 0.0, 0.0)
            .station("B", 0.0, 1.0)
            .route("A", "B", bus("A-B"))
            .build()
            .unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn builder_reports_unknown_station() {
        let result = NetworkBuilder::new()
            .station("A", 0.0, 0.0)
            .route("A", "B", bus("A-B"))
            .station("B", 0.0, 1.0)
            .build();

        assert_eq!(result.unwrap_err(), GraphError::UnknownNode("B".into()));
    }

    #[test]
    fn builder_takes_built_edge() {
        let edge = bus("A-B").base_time(Duration::minutes(20)).build().unwrap();

        let graph = NetworkBuilder::new()
            .station("A", 0.0, 0.0)
            .station("B", 0.0, 1.0)
            .edge("A", "B", edge.clone())
            .build()
            .unwrap();

        assert_eq!(graph.edge_between_names("A", "B").unwrap(), &edge);

        let result = NetworkBuilder::new()
            .station("A", 0.0, 0.0)
            .edge("A", "C", edge)
            .build();
        assert_eq!(result.unwrap_err(), GraphError::UnknownNode("C".into()));
    }

    #[test]
    fn builder_reports_invalid_route() {
        let result = NetworkBuilder::new()
            .station("A", 0.0, 0.0)
            .station("B", 0.0, 1.0)
            .route("A", "B", bus("A-B").base_cost(-3.0))
            .build();

        assert_eq!(
            result.unwrap_err(),
            GraphError::InvalidRoute(DomainError::InvalidCost(-3.0))
        );
    }

    #[test]
    fn strict_builder_rejects_duplicates() {
        let result = NetworkBuilder::strict()
            .station("A", 0.0, 0.0)
            .station("A", 1.0, 1.0)
            .build();

        assert_eq!(result.unwrap_err(), GraphError::DuplicateNode("A".into()));
    }

    #[test]
    fn keeps_first_error() {
        let result = NetworkBuilder::new()
            .route("X", "Y", bus("X-Y"))
            .route("P", "Q", bus("P-Q"))
            .build();

        assert_eq!(result.unwrap_err(), GraphError::UnknownNode("X".into()));
    }

    #[test]
    fn reference_network_shape() {
        let graph = reference_network().unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 3);

        let a_b = graph.edge_between_names("Station A", "Station B").unwrap();
        assert_eq!(a_b.total_cost(), 100.0);
        assert_eq!(a_b.total_time(), Duration::hours(8));

        let b_c = graph.edge_between_names("Station B", "Station C").unwrap();
        assert_eq!(b_c.total_cost(), 150.0);
        assert_eq!(b_c.total_time(), Duration::hours(7));

        let a_c = graph.edge_between_names("Station A", "Station C").unwrap();
        assert_eq!(a_c.total_cost(), 300.0);
        assert_eq!(a_c.total_time(), Duration::hours(13));
    }
}
