//! Collaborator contracts and their error types.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::Camera;
use crate::coord::{Coordinate, ViewportBounds};

/// Errors raised while talking to a camera, routing or geocoding service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The service answered with an unexpected content type.
    #[error("Unexpected content type '{actual}' (expected {expected})")]
    ContentType { expected: String, actual: String },

    /// The body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The service reported a failure inside an otherwise valid response.
    #[error("Service error: {0}")]
    Service(String),
}

/// Errors raised while resolving an address.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The geocoder returned no match for the address.
    #[error("Address not found: {0}")]
    NotFound(String),

    /// The geocoding request itself failed.
    #[error("Geocoding request failed: {0}")]
    Request(#[from] FetchError),
}

/// A source of camera positions for a bounding box.
///
/// Implementations must report an unreachable or misbehaving service as an
/// error, never as an empty result.
pub trait CameraSource: Send + Sync {
    /// Returns every known camera inside `bounds`.
    fn fetch_cameras(
        &self,
        bounds: &ViewportBounds,
    ) -> impl Future<Output = Result<Vec<Camera>, FetchError>> + Send;

    /// Human-readable name used in logs.
    fn name(&self) -> &str;
}

/// One path returned by a routing service.
///
/// `geometry` is `None` when the service returned an alternative without a
/// usable coordinate list; the caller decides whether to skip it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAlternative {
    pub geometry: Option<Vec<Coordinate>>,
    /// Length in meters, when reported.
    pub distance_m: Option<f64>,
    /// Travel time in seconds, when reported.
    pub duration_s: Option<f64>,
}

impl RouteAlternative {
    /// Creates an alternative carrying only a geometry.
    pub fn from_geometry(points: Vec<Coordinate>) -> Self {
        Self {
            geometry: Some(points),
            distance_m: None,
            duration_s: None,
        }
    }
}

/// A driving-route service.
pub trait RoutingService: Send + Sync {
    /// Requests full route geometry through `waypoints`, with alternatives.
    fn route(
        &self,
        waypoints: &[Coordinate],
    ) -> impl Future<Output = Result<Vec<RouteAlternative>, FetchError>> + Send;

    /// Human-readable name used in logs.
    fn name(&self) -> &str;
}

/// A structured postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl StructuredAddress {
    /// Returns the populated fields as `(name, value)` query pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postalcode", &self.postal_code),
            ("country", &self.country),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect()
    }

    /// Returns true if no field carries text.
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

impl std::fmt::Display for StructuredAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<&str> = self.query_pairs().into_iter().map(|(_, v)| v).collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// An address-to-coordinate resolver.
pub trait Geocoder: Send + Sync {
    /// Returns the single best match for `address`.
    fn geocode(
        &self,
        address: &StructuredAddress,
    ) -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_query_pairs_skip_blank_fields() {
        let address = StructuredAddress {
            street: Some("100 Main St".to_string()),
            city: Some("  ".to_string()),
            state: Some("OH".to_string()),
            postal_code: None,
            country: Some("USA".to_string()),
        };

        assert_eq!(
            address.query_pairs(),
            vec![("street", "100 Main St"), ("state", "OH"), ("country", "USA")]
        );
        assert_eq!(address.to_string(), "100 Main St, OH, USA");
    }

    #[test]
    fn test_empty_address() {
        assert!(StructuredAddress::default().is_empty());
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Status {
            status: 500,
            url: "https://overpass-api.de/api/interpreter".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 500 from https://overpass-api.de/api/interpreter"
        );
    }

    #[test]
    fn test_geocode_error_from_fetch_error() {
        let err: GeocodeError = FetchError::Http("timeout".to_string()).into();
        assert!(matches!(err, GeocodeError::Request(_)));
    }
}
