//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Location, RouteEdge, Station, TripCandidate, as_hours};
use crate::planner::PlanResult;

/// A point given by the client, in decimal degrees.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct CoordinateDto {
    pub lat: f64,
    pub lon: f64,
}

impl CoordinateDto {
    /// Validate the coordinate.
    pub fn to_location(self) -> Result<Location, DomainError> {
        Location::try_new(self.lat, self.lon)
    }
}

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Where the traveller is
    pub origin: CoordinateDto,

    /// Where the traveller wants to go
    pub destination: CoordinateDto,

    /// Stations considered at each end (defaults to the server setting)
    pub nearest_k: Option<usize>,
}

/// One ride on a route edge.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,

    /// Route name, e.g. "Train A-B"
    pub name: String,

    pub mode: String,
    pub class: String,
    pub cost: f64,

    /// Total time including delay, stops, waiting and transfer
    pub hours: f64,
}

/// A trip option.
#[derive(Debug, Serialize)]
pub struct TripResult {
    /// Stations visited, origin first
    pub stations: Vec<String>,

    pub total_hours: f64,
    pub total_cost: f64,
    pub transfers: usize,
    pub transfer_hours: f64,
    pub legs: Vec<LegResult>,
}

/// Response for trip planning.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    /// Found trip options, best first
    pub trips: Vec<TripResult>,

    /// Station pairs searched
    pub pairs_searched: usize,

    /// Station pairs with no route
    pub pairs_unreachable: usize,

    /// Station pairs whose search ran out of budget
    pub pairs_aborted: usize,

    /// Whether the plan was served from cache
    pub cached: bool,
}

/// A station in the network.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Response listing every station.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl LegResult {
    /// Create from a route edge and the stations either side of it.
    pub fn from_edge(edge: &RouteEdge, from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            name: edge.name().to_string(),
            mode: edge.mode().to_string(),
            class: edge.class().to_string(),
            cost: edge.total_cost(),
            hours: as_hours(edge.total_time()),
        }
    }
}

impl TripResult {
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
                LegResult::from_edge(edge, from, to)
            })
            .collect();

        Self {
            stations: stations.to_vec(),
            total_hours: as_hours(trip.total_time()),
            total_cost: trip.total_cost(),
            transfers: trip.total_transfers(),
            transfer_hours: as_hours(trip.total_transfer_time()),
            legs,
        }
    }
}

impl PlanTripResponse {
    /// Create from a plan.
    pub fn from_plan(plan: &PlanResult, cached: bool) -> Self {
        Self {
            trips: plan.trips.iter().map(TripResult::from_trip).collect(),
            pairs_searched: plan.pairs_searched,
            pairs_unreachable: plan.pairs_unreachable,
            pairs_aborted: plan.pairs_aborted,
            cached,
        }
    }
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        let location = station.location();
        Self {
            name: station.name().to_string(),
            lat: location.latitude,
            lon: location.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::reference_network;
    use crate::planner::{PlannerConfig, TripPlanner, TripRequest};

    fn reference_plan() -> PlanResult {
        let graph = reference_network().unwrap();
        let config = PlannerConfig::default();
        let request = TripRequest::new(
            Location::new(40.730610, -73.935242),
            Location::new(51.5155, -0.0922),
        );
        TripPlanner::new(&graph, &config).plan(&request).unwrap()
    }

    #[test]
    fn coordinate_validation() {
        assert!(CoordinateDto { lat: 51.5, lon: -0.1 }.to_location().is_ok());
        assert!(CoordinateDto { lat: 95.0, lon: 0.0 }.to_location().is_err());
        assert!(CoordinateDto { lat: 0.0, lon: 181.0 }.to_location().is_err());
    }

    #[test]
    fn plan_request_parses_without_k() {
        let json = r#"{
            "origin": {"lat": 40.7, "lon": -73.9},
            "destination": {"lat": 51.5, "lon": -0.1}
        }"#;
        let req: PlanTripRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.origin.lat, 40.7);
        assert_eq!(req.destination.lon, -0.1);
        assert_eq!(req.nearest_k, None);
    }

    #[test]
    fn trip_result_from_trip() {
        let plan = reference_plan();
        let via_b = plan
            .trips
            .iter()
            .find(|t| t.total_transfers() == 1)
            .unwrap();

        let result = TripResult::from_trip(via_b);

        assert_eq!(result.stations, vec!["Station A", "Station B", "Station C"]);
        assert_eq!(result.total_hours, 15.0);
        assert_eq!(result.total_cost, 250.0);
        assert_eq!(result.transfers, 1);
        assert_eq!(result.transfer_hours, 1.0);

        assert_eq!(result.legs.len(), 2);
        assert_eq!(result.legs[0].from, "Station A");
        assert_eq!(result.legs[0].to, "Station B");
        assert_eq!(result.legs[0].name, "Train A-B");
        assert_eq!(result.legs[0].mode, "train");
        assert_eq!(result.legs[0].hours, 8.0);
        assert_eq!(result.legs[1].from, "Station B");
        assert_eq!(result.legs[1].to, "Station C");
        assert_eq!(result.legs[1].cost, 150.0);
    }

    #[test]
    fn response_serializes() {
        let plan = reference_plan();
        let response = PlanTripResponse::from_plan(&plan, false);

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["trips"].as_array().unwrap().len(), 3);
        assert_eq!(json["trips"][0]["stations"][0], "Station B");
        assert_eq!(json["pairs_searched"], 6);
        assert_eq!(json["pairs_aborted"], 0);
        assert_eq!(json["cached"], false);
    }

    #[test]
    fn station_result() {
        let station = Station::new("Station C", Location::new(51.5074, -0.1278));
        let result = StationResult::from_station(&station);

        assert_eq!(result.name, "Station C");
        assert_eq!(result.lat, 51.5074);
        assert_eq!(result.lon, -0.1278);
    }
}
