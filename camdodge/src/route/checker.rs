//! Route intersection checker.

use crate::camera::Camera;
use crate::error::PlannerError;
use crate::geometry::{buffer_around, line_intersects_polygon, BUFFER_RADIUS_METERS};
use crate::route::Route;

/// Returns the cameras whose buffer touches any of `routes`.
///
/// Cameras are visited in store order and, for each camera, routes in the
/// order given. A camera is reported once per route it touches, so a camera
/// near the shared part of two alternatives appears twice. Buffers are
/// rebuilt on every call.
///
/// Fails with [`PlannerError::NoRoute`] when `routes` is empty.
pub fn find_cameras_on_route(
    routes: &[Route],
    cameras: &[Camera],
) -> Result<Vec<Camera>, PlannerError> {
    if routes.is_empty() {
        tracing::error!("Route polylines not found on the map");
        return Err(PlannerError::NoRoute);
    }

    let lines: Vec<_> = routes.iter().map(Route::line_string).collect();
    let mut matches = Vec::new();

    for camera in cameras {
        let buffer = buffer_around(camera.position, BUFFER_RADIUS_METERS);
        for (index, line) in lines.iter().enumerate() {
            if line_intersects_polygon(line, &buffer) {
                tracing::info!(route = index, "{} interacts with the route", camera);
                matches.push(*camera);
            }
        }
    }

    tracing::debug!(
        cameras = cameras.len(),
        routes = routes.len(),
        matches = matches.len(),
        "Intersection check complete"
    );
    Ok(matches)
}
