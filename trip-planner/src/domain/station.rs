//! Stations: the named vertices of the transport network.

use std::fmt;

use serde::Serialize;

use super::Location;

/// A named station at a fixed location.
///
/// Stations carry no search state; path searches keep their own
/// per-run bookkeeping keyed by node id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    name: String,
    location: Location,
}

impl Station {
    /// Create a station.
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    /// Returns the station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the station location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Great-circle distance between two stations in kilometres.
    pub fn distance_km(&self, other: &Station) -> f64 {
        self.location.distance_km(&other.location)
    }

    pub(crate) fn relocate(&mut self, location: Location) {
        self.location = location;
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
