//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from graph structure and search errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A duration field of a route edge was negative
    #[error("route field {field} must not be negative")]
    NegativeValue { field: &'static str },

    /// The base cost was negative, NaN or infinite
    #[error("route cost must be a finite non-negative number, got {0}")]
    InvalidCost(f64),

    /// Latitude or longitude outside the valid range
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A trip was built from zero edges
    #[error("trip must have at least one route edge")]
    EmptyTrip,
}
