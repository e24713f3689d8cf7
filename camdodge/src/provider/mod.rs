//! External service abstraction
//!
//! This module defines the collaborator contracts the planning core depends on
//! and the HTTP-backed implementations for the public OpenStreetMap services:
//!
//! | Contract         | Implementation         | Service    |
//! |------------------|------------------------|------------|
//! | [`CameraSource`] | [`OverpassClient`]     | Overpass   |
//! | [`RoutingService`] | [`OsrmClient`]       | OSRM       |
//! | [`Geocoder`]     | [`NominatimGeocoder`]  | Nominatim  |
//!
//! All adapters are generic over [`AsyncHttpClient`] so tests can swap in a
//! canned client:
//!
//! ```ignore
//! use camdodge::provider::{OsrmClient, ReqwestClient, RoutingService};
//!
//! let routing = OsrmClient::new(ReqwestClient::new()?);
//! let alternatives = routing.route(&waypoints).await?;
//! ```

mod http;
mod nominatim;
mod osrm;
mod overpass;
mod types;

pub use http::{AsyncHttpClient, HttpResponse, ReqwestClient, DEFAULT_TIMEOUT_SECS, USER_AGENT};
pub use nominatim::{NominatimGeocoder, DEFAULT_NOMINATIM_URL};
pub use osrm::{OsrmClient, DEFAULT_OSRM_URL};
pub use overpass::{OverpassClient, DEFAULT_OVERPASS_URL};
pub use types::{
    CameraSource, FetchError, GeocodeError, Geocoder, RouteAlternative, RoutingService,
    StructuredAddress,
};

#[cfg(test)]
pub use http::tests::{MockAsyncHttpClient, RecordedRequest};
