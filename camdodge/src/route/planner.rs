//! Route avoidance planner.
//!
//! Turns the cameras found on a route into a waypoint list that asks the
//! routing service to pass near, but not through, each camera's buffer.

use geo::Polygon;

use crate::camera::Camera;
use crate::coord::Coordinate;
use crate::geometry::{buffer_around, first_vertex, BUFFER_RADIUS_METERS};
use crate::route::WaypointList;

/// Offset added to both latitude and longitude of the chosen buffer vertex.
pub const AVOIDANCE_OFFSET_DEGREES: f64 = 0.005;

/// Picks a detour point for one camera.
pub trait AvoidanceStrategy: Send + Sync {
    /// Returns the point the route should pass through to avoid `camera`,
    /// or `None` to leave that camera out of the plan.
    fn avoidance_point(&self, camera: &Camera, buffer: &Polygon<f64>) -> Option<Coordinate>;

    /// Strategy name for logging.
    fn name(&self) -> &str;
}

/// Steps off the buffer's first ring vertex by a fixed diagonal offset.
///
/// The first vertex is the due-east point of the buffer, so with the default
/// offset the detour point lands roughly 550 m north-east of the camera. The
/// point is not checked against other cameras' buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOffsetStrategy {
    offset_degrees: f64,
}

impl VertexOffsetStrategy {
    pub fn new(offset_degrees: f64) -> Self {
        Self { offset_degrees }
    }
}

impl Default for VertexOffsetStrategy {
    fn default() -> Self {
        Self::new(AVOIDANCE_OFFSET_DEGREES)
    }
}

impl AvoidanceStrategy for VertexOffsetStrategy {
    fn avoidance_point(&self, _camera: &Camera, buffer: &Polygon<f64>) -> Option<Coordinate> {
        first_vertex(buffer).map(|v| v.offset(self.offset_degrees, self.offset_degrees))
    }

    fn name(&self) -> &str {
        "vertex-offset"
    }
}

/// Builds `[start, detour per camera, end]` with the default strategy.
pub fn plan_avoidance(cameras: &[Camera], start: Coordinate, end: Coordinate) -> WaypointList {
    plan_avoidance_with(&VertexOffsetStrategy::default(), cameras, start, end)
}

/// Builds `[start, detour per camera, end]` with `strategy`.
///
/// Detour points follow the order of `cameras`. Duplicated cameras produce
/// duplicated points; nothing is merged or capped.
pub fn plan_avoidance_with<A: AvoidanceStrategy + ?Sized>(
    strategy: &A,
    cameras: &[Camera],
    start: Coordinate,
    end: Coordinate,
) -> WaypointList {
    let mut waypoints = WaypointList::new(start, end);

    for camera in cameras {
        let buffer = buffer_around(camera.position, BUFFER_RADIUS_METERS);
        match strategy.avoidance_point(camera, &buffer) {
            Some(point) => waypoints.push_via(point),
            None => tracing::debug!(strategy = strategy.name(), "No avoidance point for {}", camera),
        }
    }

    tracing::debug!(
        strategy = strategy.name(),
        waypoints = waypoints.as_slice().len(),
        "Avoidance plan built"
    );
    waypoints
}
