//! Candidate station selection by straight-line distance.

use crate::domain::{Location, Station};
use crate::graph::NodeId;

/// The `k` stations closest to `point`, nearest first.
///
/// `stations` is indexed by node id, as returned by `Graph::stations`.
/// Stations at equal distance keep their registration order. Returns every
/// station when there are fewer than `k`.
pub fn nearest_stations(stations: &[Station], point: &Location, k: usize) -> Vec<NodeId> {
    let mut by_distance: Vec<(NodeId, f64)> = stations
        .iter()
        .enumerate()
        .map(|(i, station)| (NodeId(i), station.location().distance_km(point)))
        .collect();

    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
    by_distance.truncate(k);
    by_distance.into_iter().map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::reference_network;

    fn station(name: &str, latitude: f64, longitude: f64) -> Station {
        Station::new(name, Location::new(latitude, longitude))
    }

    #[test]
    fn nearest_first() {
        let graph = reference_network().unwrap();
        // Queens, New York
        let home = Location::new(40.730610, -73.935242);

        let nearest = nearest_stations(graph.stations(), &home, 3);

        let names: Vec<_> = nearest
            .iter()
            .map(|id| graph.station(*id).unwrap().name())
            .collect();
        assert_eq!(names, vec!["Station A", "Station B", "Station C"]);
    }

    #[test]
    fn truncates_to_k() {
        let graph = reference_network().unwrap();
        let hotel = Location::new(51.5155, -0.0922);

        let nearest = nearest_stations(graph.stations(), &hotel, 1);

        assert_eq!(nearest.len(), 1);
        assert_eq!(graph.station(nearest[0]).unwrap().name(), "Station C");
    }

    #[test]
    fn fewer_stations_than_k() {
        let stations = vec![station("Only", 0.0, 0.0)];

        let nearest = nearest_stations(&stations, &Location::new(1.0, 1.0), 5);

        assert_eq!(nearest, vec![NodeId(0)]);
    }

    #[test]
    fn zero_k_or_no_stations() {
        let stations = vec![station("Only", 0.0, 0.0)];

        assert!(nearest_stations(&stations, &Location::new(0.0, 0.0), 0).is_empty());
        assert!(nearest_stations(&[], &Location::new(0.0, 0.0), 3).is_empty());
    }

    #[test]
    fn equal_distance_keeps_registration_order() {
        // Both one degree of longitude from the equatorial origin
        let stations = vec![
            station("East", 0.0, 1.0),
            station("West", 0.0, -1.0),
            station("Far", 0.0, 10.0),
        ];

        let nearest = nearest_stations(&stations, &Location::new(0.0, 0.0), 2);

        assert_eq!(nearest, vec![NodeId(0), NodeId(1)]);
    }
}
