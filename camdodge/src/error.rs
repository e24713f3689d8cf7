//! Planner error types.

use thiserror::Error;

use crate::coord::CoordError;
use crate::provider::{FetchError, GeocodeError};

/// Errors raised by the avoidance pipeline.
///
/// None of these are fatal: the session logs them, clears its loading state
/// and hands them back to the shell.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// A camera, routing or geocoding service failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The intersection check ran before any route was rendered.
    #[error("No route to check: compute a route first")]
    NoRoute,

    /// A routing request was attempted with a malformed waypoint list.
    #[error("Invalid waypoints: {0}")]
    InvalidWaypoints(String),

    /// A route geometry with fewer than two points was supplied.
    #[error("Invalid route geometry: {0}")]
    InvalidGeometry(String),

    /// An address could not be resolved.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// A start or end coordinate was not a finite number.
    #[error(transparent)]
    InvalidCoordinate(#[from] CoordError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_error_display() {
        let err = PlannerError::InvalidWaypoints("only 1 waypoint".to_string());
        assert!(err.to_string().contains("Invalid waypoints"));
        assert!(err.to_string().contains("only 1 waypoint"));
    }

    #[test]
    fn test_planner_error_from_fetch_error() {
        let err: PlannerError = FetchError::Http("timeout".to_string()).into();
        assert!(matches!(err, PlannerError::Fetch(_)));
        assert_eq!(err.to_string(), "HTTP request failed: timeout");
    }

    #[test]
    fn test_planner_error_from_geocode_error() {
        let err: PlannerError = GeocodeError::NotFound("Nowhere".to_string()).into();
        assert!(matches!(err, PlannerError::Geocode(_)));
    }
}
