//! Common types and utilities shared across CLI commands.

use camdodge::camera::Camera;
use camdodge::coord::{Coordinate, ViewportBounds};
use camdodge::provider::StructuredAddress;
use camdodge::route::Route;
use console::style;

use crate::error::CliError;

/// Map centre used before any endpoints are known.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 39.9242,
    lon: -82.8089,
};

/// Half-size of the initial viewport around [`DEFAULT_CENTER`], in degrees.
pub const DEFAULT_VIEWPORT_RADIUS_DEGREES: f64 = 0.1;

/// The viewport shown before the session moves it.
pub fn initial_viewport() -> ViewportBounds {
    ViewportBounds::from_edges(
        DEFAULT_CENTER.lat - DEFAULT_VIEWPORT_RADIUS_DEGREES,
        DEFAULT_CENTER.lon - DEFAULT_VIEWPORT_RADIUS_DEGREES,
        DEFAULT_CENTER.lat + DEFAULT_VIEWPORT_RADIUS_DEGREES,
        DEFAULT_CENTER.lon + DEFAULT_VIEWPORT_RADIUS_DEGREES,
    )
}

/// Parses `"street, city, state, postal code, country"`.
///
/// Fields are positional; trailing fields may be omitted and empty fields
/// are skipped, so `", Springfield, OH"` is a city and state.
pub fn parse_address(input: &str) -> Result<StructuredAddress, CliError> {
    let mut fields = input.split(',').map(|f| {
        let f = f.trim();
        (!f.is_empty()).then(|| f.to_string())
    });

    let address = StructuredAddress {
        street: fields.next().flatten(),
        city: fields.next().flatten(),
        state: fields.next().flatten(),
        postal_code: fields.next().flatten(),
        country: fields.next().flatten(),
    };

    if fields.next().is_some() {
        return Err(CliError::Config(format!(
            "Address '{}' has more than 5 comma-separated fields",
            input
        )));
    }
    if address.is_empty() {
        return Err(CliError::Config(format!("Address '{}' is empty", input)));
    }
    Ok(address)
}

/// Formats a route's length and travel time, when known.
pub fn format_route(index: usize, route: &Route) -> String {
    let mut line = format!("Route {}: {} points", index + 1, route.points().len());
    if let Some(meters) = route.distance_m() {
        line.push_str(&format!(", {:.1} km", meters / 1000.0));
    }
    if let Some(seconds) = route.duration_s() {
        line.push_str(&format!(", {:.0} min", seconds / 60.0));
    }
    line
}

/// Prints a camera list under a styled heading.
pub fn print_cameras(heading: &str, cameras: &[Camera]) {
    println!("{}", style(heading).bold());
    if cameras.is_empty() {
        println!("  (none)");
    }
    for camera in cameras {
        match camera.osm_id {
            Some(id) => println!("  {} {}", camera, style(format!("[node {}]", id)).dim()),
            None => println!("  {}", camera),
        }
    }
}
