//! Graph structure errors.

/// Errors raised while building or querying a [`Graph`](super::Graph).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// An edge or lookup referenced a station that was never added
    #[error("unknown station: {0}")]
    UnknownNode(String),

    /// No edge exists for the ordered pair
    #[error("no route from {from} to {to}")]
    NoSuchEdge { from: String, to: String },

    /// Station already registered and the graph rejects duplicates
    #[error("station {0} is already registered")]
    DuplicateNode(String),

    /// Edge already registered and the graph rejects duplicates
    #[error("route from {from} to {to} is already registered")]
    DuplicateEdge { from: String, to: String },

    /// The route edge itself failed validation
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] crate::domain::DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn error_display() {
        let err = GraphError::UnknownNode("Station Z".into());
        assert_eq!(err.to_string(), "unknown station: Station Z");

        let err = GraphError::NoSuchEdge {
            from: "A".into(),
            to: "B".into(),
        };
        assert_eq!(err.to_string(), "no route from A to B");

        let err = GraphError::DuplicateNode("A".into());
        assert_eq!(err.to_string(), "station A is already registered");

        let err = GraphError::DuplicateEdge {
            from: "A".into(),
            to: "B".into(),
        };
        assert_eq!(err.to_string(), "route from A to B is already registered");

        let err = GraphError::from(DomainError::EmptyTrip);
        assert_eq!(
            err.to_string(),
            "invalid route: trip must have at least one route edge"
        );
    }
}
