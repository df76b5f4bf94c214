//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Creates a location without range checks.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a location, rejecting non-finite or out-of-range coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_planner::domain::Location;
    ///
    /// assert!(Location::try_new(51.5074, -0.1278).is_ok());
    /// assert!(Location::try_new(95.0, 0.0).is_err());
    /// assert!(Location::try_new(0.0, f64::NAN).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(DomainError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Great-circle (haversine) distance to `other` in kilometres.
    pub fn distance_km(&self, other: &Location) -> f64 {
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn location() -> impl Strategy<Value = Location> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Location::new(lat, lon))
    }

    proptest! {
        #[test]
        fn distance_bounded_by_half_circumference(a in location(), b in location()) {
            let d = a.distance_km(&b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        #[test]
        fn triangle_inequality(a in location(), b in location(), c in location()) {
            let direct = a.distance_km(&c);
            let via = a.distance_km(&b) + b.distance_km(&c);
            prop_assert!(direct <= via + 1e-6);
        }
    }
}
