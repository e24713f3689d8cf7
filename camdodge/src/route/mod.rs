//! Routes, waypoints and the camera-avoidance pipeline.
//!
//! # Pipeline
//!
//! ```text
//! rendered routes ─┐
//!                  ├─► find_cameras_on_route ─► plan_avoidance ─► RouteRecalculator
//! camera store ────┘        (pure)                 (pure)          (routing I/O)
//! ```
//!
//! The two middle steps return plain data; drawing markers and filling the
//! results list is left to [`crate::surface::Presenter`].

mod checker;
mod driver;
mod planner;

pub use checker::find_cameras_on_route;
pub use driver::RouteRecalculator;
pub use planner::{
    plan_avoidance, plan_avoidance_with, AvoidanceStrategy, VertexOffsetStrategy,
    AVOIDANCE_OFFSET_DEGREES,
};

use geo::LineString;
use serde::Serialize;

use crate::coord::Coordinate;
use crate::error::PlannerError;
use crate::geometry;
use crate::provider::RouteAlternative;

/// A drivable path: at least two positions in travel order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    points: Vec<Coordinate>,
    /// Length in meters, when the routing service reported it.
    distance_m: Option<f64>,
    /// Travel time in seconds, when the routing service reported it.
    duration_s: Option<f64>,
}

impl Route {
    /// Creates a route from its geometry.
    pub fn new(points: Vec<Coordinate>) -> Result<Self, PlannerError> {
        if points.len() < 2 {
            return Err(PlannerError::InvalidGeometry(format!(
                "a route needs at least 2 points, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_valid()) {
            return Err(PlannerError::InvalidGeometry(format!(
                "non-finite point {:?}",
                bad
            )));
        }

        Ok(Self {
            points,
            distance_m: None,
            duration_s: None,
        })
    }

    /// Attaches the service-reported length and travel time.
    pub fn with_summary(mut self, distance_m: Option<f64>, duration_s: Option<f64>) -> Self {
        self.distance_m = distance_m;
        self.duration_s = duration_s;
        self
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn start(&self) -> Coordinate {
        self.points[0]
    }

    pub fn end(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    pub fn distance_m(&self) -> Option<f64> {
        self.distance_m
    }

    pub fn duration_s(&self) -> Option<f64> {
        self.duration_s
    }

    /// The geometry as a `geo` line string.
    pub fn line_string(&self) -> LineString<f64> {
        geometry::to_line_string(&self.points)
    }
}

impl TryFrom<RouteAlternative> for Route {
    type Error = PlannerError;

    fn try_from(alternative: RouteAlternative) -> Result<Self, Self::Error> {
        let points = alternative.geometry.ok_or_else(|| {
            PlannerError::InvalidGeometry("route geometry or coordinates not found".to_string())
        })?;
        Ok(Route::new(points)?.with_summary(alternative.distance_m, alternative.duration_s))
    }
}

/// An ordered routing request: start, avoidance points, end.
///
/// Always holds at least two positions. Start and end never change; only
/// interior points are inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointList {
    points: Vec<Coordinate>,
}

impl WaypointList {
    /// Creates a direct start-to-end request.
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    /// Inserts an avoidance point just before the end.
    pub fn push_via(&mut self, point: Coordinate) {
        let end = self.points.len() - 1;
        self.points.insert(end, point);
    }

    pub fn start(&self) -> Coordinate {
        self.points[0]
    }

    pub fn end(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// The avoidance points between start and end.
    pub fn vias(&self) -> &[Coordinate] {
        &self.points[1..self.points.len() - 1]
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_vec(self) -> Vec<Coordinate> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Coordinate {
        Coordinate::new(39.90, -83.00)
    }

    fn end() -> Coordinate {
        Coordinate::new(39.80, -83.10)
    }

    #[test]
    fn test_route_requires_two_points() {
        assert!(matches!(
            Route::new(vec![start()]),
            Err(PlannerError::InvalidGeometry(_))
        ));
        assert!(Route::new(vec![start(), end()]).is_ok());
    }

    #[test]
    fn test_route_rejects_nan_point() {
        let result = Route::new(vec![start(), Coordinate::new(f64::NAN, 0.0)]);
        assert!(matches!(result, Err(PlannerError::InvalidGeometry(_))));
    }

    #[test]
    fn test_route_endpoints() {
        let route = Route::new(vec![start(), Coordinate::new(39.85, -83.05), end()]).unwrap();
        assert_eq!(route.start(), start());
        assert_eq!(route.end(), end());
        assert_eq!(route.line_string().0.len(), 3);
    }

    #[test]
    fn test_route_from_alternative() {
        let alternative = RouteAlternative {
            geometry: Some(vec![start(), end()]),
            distance_m: Some(13_800.0),
            duration_s: Some(900.0),
        };
        let route = Route::try_from(alternative).unwrap();
        assert_eq!(route.distance_m(), Some(13_800.0));
        assert_eq!(route.duration_s(), Some(900.0));
    }

    #[test]
    fn test_route_from_alternative_without_geometry() {
        let alternative = RouteAlternative {
            geometry: None,
            distance_m: None,
            duration_s: None,
        };
        assert!(Route::try_from(alternative).is_err());
    }

    #[test]
    fn test_waypoint_list_inserts_before_end() {
        let mut waypoints = WaypointList::new(start(), end());
        waypoints.push_via(Coordinate::new(1.0, 1.0));
        waypoints.push_via(Coordinate::new(2.0, 2.0));

        assert_eq!(
            waypoints.as_slice(),
            &[
                start(),
                Coordinate::new(1.0, 1.0),
                Coordinate::new(2.0, 2.0),
                end()
            ]
        );
        assert_eq!(waypoints.vias().len(), 2);
        assert_eq!(waypoints.start(), start());
        assert_eq!(waypoints.end(), end());
    }

    #[test]
    fn test_waypoint_list_direct_has_no_vias() {
        let waypoints = WaypointList::new(start(), end());
        assert!(waypoints.vias().is_empty());
        assert_eq!(waypoints.into_vec().len(), 2);
    }
}
