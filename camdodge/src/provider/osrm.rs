//! OSRM routing service.
//!
//! # URL Pattern
//!
//! `{base}/route/v1/driving/{lon},{lat};{lon},{lat};...?overview=full&alternatives=true&steps=true&geometries=geojson`
//!
//! - Coordinates are `lon,lat` pairs separated by `;`, in travel order
//! - `overview=full` returns the complete geometry rather than a simplified one
//! - `geometries=geojson` returns `[lon, lat]` arrays instead of an encoded polyline
//!
//! A response looks like:
//!
//! ```text
//! {"code": "Ok", "routes": [{"geometry": {"type": "LineString", "coordinates": [[lon, lat], ...]},
//!                            "distance": 15234.1, "duration": 1032.5}, ...]}
//! ```

use serde::Deserialize;

use crate::coord::Coordinate;
use crate::provider::{AsyncHttpClient, FetchError, RouteAlternative, RoutingService};

/// Public OSRM demo server.
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    // Kept loose so one malformed alternative does not fail the whole response
    geometry: Option<serde_json::Value>,
    distance: Option<f64>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonLineString {
    coordinates: Vec<[f64; 2]>,
}

/// Routing service backed by an OSRM server.
pub struct OsrmClient<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> OsrmClient<C> {
    /// Creates a client for the public OSRM demo server.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, DEFAULT_OSRM_URL)
    }

    /// Creates a client for a custom OSRM server.
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the route URL through all `waypoints`.
    fn build_url(&self, waypoints: &[Coordinate]) -> String {
        let coords = waypoints
            .iter()
            .map(|wp| format!("{},{}", wp.lon, wp.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/route/v1/driving/{}?overview=full&alternatives=true&steps=true&geometries=geojson",
            self.base_url, coords
        )
    }

    fn parse_geometry(value: serde_json::Value) -> Option<Vec<Coordinate>> {
        match serde_json::from_value::<GeoJsonLineString>(value) {
            Ok(line) => Some(
                line.coordinates
                    .into_iter()
                    .map(|[lon, lat]| Coordinate::new(lat, lon))
                    .collect(),
            ),
            Err(e) => {
                tracing::debug!(error = %e, "Route geometry is not a GeoJSON line string");
                None
            }
        }
    }

    fn parse_routes(body: &[u8]) -> Result<Vec<RouteAlternative>, FetchError> {
        let response: OsrmResponse =
            serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

        if response.code != "Ok" {
            return Err(FetchError::Service(format!(
                "{}: {}",
                response.code,
                response.message.unwrap_or_default()
            )));
        }

        Ok(response
            .routes
            .into_iter()
            .map(|route| RouteAlternative {
                geometry: route.geometry.and_then(Self::parse_geometry),
                distance_m: route.distance,
                duration_s: route.duration,
            })
            .collect())
    }
}

impl<C: AsyncHttpClient> RoutingService for OsrmClient<C> {
    async fn route(&self, waypoints: &[Coordinate]) -> Result<Vec<RouteAlternative>, FetchError> {
        let url = self.build_url(waypoints);
        tracing::debug!(%url, "Requesting OSRM route");

        let response = self.http_client.get(&url).await?;
        Self::parse_routes(&response.body)
    }

    fn name(&self) -> &str {
        "OSRM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockAsyncHttpClient;

    const TWO_ROUTES: &str = r#"{
        "code": "Ok",
        "routes": [
            {"geometry": {"type": "LineString", "coordinates": [[-83.00, 39.90], [-83.05, 39.85], [-83.10, 39.80]]},
             "distance": 13800.5, "duration": 900.0},
            {"geometry": {"type": "LineString", "coordinates": [[-83.00, 39.90], [-83.10, 39.80]]}}
        ],
        "waypoints": []
    }"#;

    fn endpoints() -> Vec<Coordinate> {
        vec![Coordinate::new(39.90, -83.00), Coordinate::new(39.80, -83.10)]
    }

    #[test]
    fn test_url_construction_includes_every_waypoint() {
        let client = OsrmClient::new(MockAsyncHttpClient::json(TWO_ROUTES));
        let waypoints = vec![
            Coordinate::new(39.90, -83.00),
            Coordinate::new(39.855, -83.044),
            Coordinate::new(39.80, -83.10),
        ];

        let url = client.build_url(&waypoints);
        assert_eq!(
            url,
            "https://router.project-osrm.org/route/v1/driving/-83,39.9;-83.044,39.855;-83.1,39.8?overview=full&alternatives=true&steps=true&geometries=geojson"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            OsrmClient::with_base_url(MockAsyncHttpClient::json("{}"), "http://localhost:5000/");
        assert!(client
            .build_url(&endpoints())
            .starts_with("http://localhost:5000/route/v1/driving/"));
    }

    #[tokio::test]
    async fn test_route_parses_alternatives() {
        let client = OsrmClient::new(MockAsyncHttpClient::json(TWO_ROUTES));

        let routes = client.route(&endpoints()).await.unwrap();
        assert_eq!(routes.len(), 2);

        let first = routes[0].geometry.as_ref().unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first[1], Coordinate::new(39.85, -83.05));
        assert_eq!(routes[0].distance_m, Some(13800.5));
        assert_eq!(routes[1].duration_s, None);
    }

    #[tokio::test]
    async fn test_route_with_malformed_geometry_is_kept_without_geometry() {
        let body = r#"{
            "code": "Ok",
            "routes": [
                {"geometry": "encoded_polyline_string"},
                {"distance": 10.0},
                {"geometry": {"coordinates": [[-83.00, 39.90], [-83.10, 39.80]]}}
            ]
        }"#;
        let client = OsrmClient::new(MockAsyncHttpClient::json(body));

        let routes = client.route(&endpoints()).await.unwrap();
        assert_eq!(routes.len(), 3);
        assert!(routes[0].geometry.is_none());
        assert!(routes[1].geometry.is_none());
        assert_eq!(routes[2].geometry.as_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_route_service_error_code() {
        let body = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;
        let client = OsrmClient::new(MockAsyncHttpClient::json(body));

        match client.route(&endpoints()).await {
            Err(FetchError::Service(msg)) => assert!(msg.contains("NoRoute")),
            other => panic!("Expected Service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_route_network_error() {
        let client = OsrmClient::new(MockAsyncHttpClient::new(Err(FetchError::Http(
            "Connection refused".to_string(),
        ))));

        match client.route(&endpoints()).await {
            Err(FetchError::Http(msg)) => assert!(msg.contains("Connection refused")),
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_route_uses_get() {
        let client = OsrmClient::new(MockAsyncHttpClient::json(TWO_ROUTES));
        client.route(&endpoints()).await.unwrap();
        assert_eq!(client.http_client.last_request().unwrap().method, "GET");
    }
}
