//! Domain types for the trip planner.
//!
//! This module contains the core domain model: locations, stations,
//! route edges and trip summaries. Types that carry invariants enforce
//! them at construction time, so code that receives them can trust them.

mod error;
mod location;
mod route;
mod station;
mod trip;

pub use error::DomainError;
pub use location::{EARTH_RADIUS_KM, Location};
pub use route::{RouteEdge, RouteEdgeBuilder, ServiceClass, TransportMode, as_hours};
pub use station::Station;
pub use trip::TripCandidate;
