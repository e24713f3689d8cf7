//! Nominatim structured-address geocoder.
//!
//! `GET {base}/search?format=json&limit=1&street=..&city=..&state=..&postalcode=..&country=..`
//!
//! Nominatim returns latitude and longitude as strings.

use serde::Deserialize;

use crate::coord::Coordinate;
use crate::provider::{AsyncHttpClient, FetchError, GeocodeError, Geocoder, StructuredAddress};

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Geocoder backed by a Nominatim server.
pub struct NominatimGeocoder<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
}

impl<C: AsyncHttpClient> NominatimGeocoder<C> {
    /// Creates a geocoder for the public Nominatim instance.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, DEFAULT_NOMINATIM_URL)
    }

    /// Creates a geocoder for a custom Nominatim server.
    pub fn with_base_url(http_client: C, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn build_url(&self, address: &StructuredAddress) -> Result<String, FetchError> {
        let mut params = vec![("format", "json"), ("limit", "1")];
        params.extend(address.query_pairs());

        reqwest::Url::parse_with_params(&format!("{}/search", self.base_url), &params)
            .map(|url| url.to_string())
            .map_err(|e| FetchError::Http(format!("Invalid geocoder URL: {}", e)))
    }

    fn parse_place(address: &StructuredAddress, body: &[u8]) -> Result<Coordinate, GeocodeError> {
        let places: Vec<NominatimPlace> =
            serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;

        let lat = place.lat.parse::<f64>();
        let lon = place.lon.parse::<f64>();
        match (lat, lon) {
            (Ok(lat), Ok(lon)) => {
                let coord = Coordinate::checked(lat, lon)
                    .map_err(|e| FetchError::Parse(e.to_string()))?;
                tracing::debug!(place = %place.display_name, %coord, "Geocoded address");
                Ok(coord)
            }
            _ => Err(FetchError::Parse(format!(
                "Invalid coordinates '{}', '{}'",
                place.lat, place.lon
            ))
            .into()),
        }
    }
}

impl<C: AsyncHttpClient> Geocoder for NominatimGeocoder<C> {
    async fn geocode(&self, address: &StructuredAddress) -> Result<Coordinate, GeocodeError> {
        if address.is_empty() {
            return Err(GeocodeError::NotFound("<empty address>".to_string()));
        }

        let url = self.build_url(address)?;
        let response = self.http_client.get(&url).await?;
        response.require_content_type("json")?;
        Self::parse_place(address, &response.body)
    }
}
