//! Overpass API camera source.
//!
//! Queries OpenStreetMap for surveillance nodes inside a bounding box.
//!
//! # Query
//!
//! ```text
//! [out:json][timeout:10];
//! (
//!   node["amenity"="camera"](south,west,north,east);
//!   node["man_made"="surveillance"](south,west,north,east);
//! );
//! out body;
//! ```
//!
//! The query is POSTed as the `data` form field. Only `application/json`
//! responses are accepted: Overpass answers overload and syntax errors with
//! HTML or XML bodies, sometimes under a 200 status.

use serde::Deserialize;

use crate::camera::Camera;
use crate::coord::{Coordinate, ViewportBounds};
use crate::provider::{AsyncHttpClient, CameraSource, FetchError};

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Server-side query timeout in seconds.
const QUERY_TIMEOUT_SECS: u32 = 10;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    id: Option<u64>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Camera source backed by the Overpass API.
pub struct OverpassClient<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
}

impl<C: AsyncHttpClient> OverpassClient<C> {
    /// Creates a client for the public Overpass endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_endpoint(http_client, DEFAULT_OVERPASS_URL)
    }

    /// Creates a client for a custom interpreter URL.
    pub fn with_endpoint(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
        }
    }

    /// Builds the Overpass QL query for `bounds`.
    fn build_query(bounds: &ViewportBounds) -> String {
        let bbox = format!(
            "{},{},{},{}",
            bounds.south(),
            bounds.west(),
            bounds.north(),
            bounds.east()
        );
        format!(
            "[out:json][timeout:{timeout}];\n(\n  node[\"amenity\"=\"camera\"]({bbox});\n  node[\"man_made\"=\"surveillance\"]({bbox});\n);\nout body;",
            timeout = QUERY_TIMEOUT_SECS,
            bbox = bbox
        )
    }

    fn parse_cameras(body: &[u8]) -> Result<Vec<Camera>, FetchError> {
        let response: OverpassResponse =
            serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

        let cameras = response
            .elements
            .into_iter()
            .filter_map(|element| match (element.lat, element.lon) {
                (Some(lat), Some(lon)) => {
                    let camera = Camera::new(Coordinate::new(lat, lon));
                    Some(match element.id {
                        Some(id) => camera.with_osm_id(id),
                        None => camera,
                    })
                }
                _ => {
                    tracing::debug!(id = ?element.id, "Skipping Overpass element without position");
                    None
                }
            })
            .collect();

        Ok(cameras)
    }
}

impl<C: AsyncHttpClient> CameraSource for OverpassClient<C> {
    async fn fetch_cameras(&self, bounds: &ViewportBounds) -> Result<Vec<Camera>, FetchError> {
        let query = Self::build_query(bounds);
        tracing::debug!(endpoint = %self.endpoint, %bounds, "Querying Overpass");

        let response = self
            .http_client
            .post_form(&self.endpoint, &[("data", query.as_str())])
            .await?;
        response.require_content_type("application/json")?;

        let cameras = Self::parse_cameras(&response.body)?;
        tracing::debug!(count = cameras.len(), "Overpass returned cameras");
        Ok(cameras)
    }

    fn name(&self) -> &str {
        "Overpass"
    }
}
