//! Proximity geometry in geographic degrees.
//!
//! Buffers are built directly in degree space using a local meters-to-degrees
//! approximation. This is accurate to well under a meter for radii of a few
//! tens of meters, which is all the camera buffer needs, and it behaves the
//! same in every hemisphere and on either side of the antimeridian because
//! only small offsets around the center are involved. It is **not** suitable
//! for radii of kilometers.
//!
//! # Ring layout
//!
//! ```text
//!            N
//!         .  .  .
//!      .           .
//!     W      c      E  <- vertex 0, ring proceeds clockwise (E -> S -> W -> N)
//!      .           .
//!         .  .  .
//!            S
//! ```

use geo::{Intersects, LineString, Polygon};

use crate::coord::Coordinate;

/// Radius of the proximity buffer around every camera, in meters.
///
/// Detection and avoidance both use this value; if they disagreed the planner
/// would aim at points that are inside or far outside the detected zone.
pub const BUFFER_RADIUS_METERS: f64 = 50.0;

/// Number of straight segments used to approximate the buffer circle.
pub const BUFFER_SEGMENTS: usize = 32;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Length of one degree of latitude on the mean sphere, in meters.
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_METERS * std::f64::consts::PI / 180.0;

/// Converts a distance in meters to `(dlat, dlon)` degree offsets at `latitude`.
///
/// The longitude offset grows with `1 / cos(latitude)`; at the poles it is
/// capped to keep the result finite.
#[inline]
pub fn meters_to_degrees(meters: f64, latitude: f64) -> (f64, f64) {
    let dlat = meters / METERS_PER_DEGREE;
    let cos_lat = latitude.to_radians().cos().abs().max(1e-6);
    (dlat, dlat / cos_lat)
}

/// Builds a closed polygon approximating a circle of `radius_meters` around `center`.
///
/// The exterior ring has `BUFFER_SEGMENTS + 1` coordinates; the first one is
/// the due-east vertex and the last one repeats it.
pub fn buffer_around(center: Coordinate, radius_meters: f64) -> Polygon<f64> {
    let (dlat, dlon) = meters_to_degrees(radius_meters, center.lat);
    let step = 2.0 * std::f64::consts::PI / BUFFER_SEGMENTS as f64;

    let mut ring: Vec<geo::Coord<f64>> = (0..BUFFER_SEGMENTS)
        .map(|i| {
            // Negative angle = clockwise from east
            let angle = -(i as f64) * step;
            geo::Coord {
                x: center.lon + dlon * angle.cos(),
                y: center.lat + dlat * angle.sin(),
            }
        })
        .collect();
    ring.push(ring[0]);

    Polygon::new(LineString::new(ring), vec![])
}

/// Returns the first coordinate of the polygon's exterior ring.
pub fn first_vertex(polygon: &Polygon<f64>) -> Option<Coordinate> {
    polygon
        .exterior()
        .coords()
        .next()
        .map(|c| Coordinate::from_geo(*c))
}

/// Converts an ordered list of positions into a line string.
pub fn to_line_string(points: &[Coordinate]) -> LineString<f64> {
    LineString::new(points.iter().map(|p| p.to_geo()).collect())
}

/// Returns true iff any segment of `line` crosses or touches `polygon`,
/// or lies inside it.
pub fn line_intersects_polygon(line: &LineString<f64>, polygon: &Polygon<f64>) -> bool {
    polygon.intersects(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(polygon: &Polygon<f64>) -> Vec<Coordinate> {
        polygon
            .exterior()
            .coords()
            .map(|c| Coordinate::from_geo(*c))
            .collect()
    }

    #[test]
    fn test_buffer_ring_is_closed() {
        let buffer = buffer_around(Coordinate::new(39.85, -83.05), BUFFER_RADIUS_METERS);
        let ring = ring(&buffer);

        assert_eq!(ring.len(), BUFFER_SEGMENTS + 1);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_buffer_first_vertex_is_east() {
        let center = Coordinate::new(39.85, -83.05);
        let buffer = buffer_around(center, BUFFER_RADIUS_METERS);
        let first = first_vertex(&buffer).unwrap();
        let (_, dlon) = meters_to_degrees(BUFFER_RADIUS_METERS, center.lat);

        assert!((first.lat - center.lat).abs() < 1e-12);
        assert!((first.lon - (center.lon + dlon)).abs() < 1e-12);
    }

    #[test]
    fn test_buffer_vertices_are_at_radius() {
        let center = Coordinate::new(-33.87, 151.21);
        let buffer = buffer_around(center, BUFFER_RADIUS_METERS);
        let cos_lat = center.lat.to_radians().cos();

        for vertex in ring(&buffer) {
            let north_m = (vertex.lat - center.lat) * METERS_PER_DEGREE;
            let east_m = (vertex.lon - center.lon) * METERS_PER_DEGREE * cos_lat;
            let distance = (north_m * north_m + east_m * east_m).sqrt();
            assert!(
                (distance - BUFFER_RADIUS_METERS).abs() < 0.01,
                "vertex {} is {} m from center",
                vertex,
                distance
            );
        }
    }

    #[test]
    fn test_buffer_across_antimeridian() {
        let center = Coordinate::new(0.0, 179.9999);
        let buffer = buffer_around(center, BUFFER_RADIUS_METERS);
        let first = first_vertex(&buffer).unwrap();

        // Local offsets only: no wrap-around to -180
        assert!(first.lon > 179.9999);
    }

    #[test]
    fn test_meters_to_degrees_equator() {
        let (dlat, dlon) = meters_to_degrees(METERS_PER_DEGREE, 0.0);
        assert!((dlat - 1.0).abs() < 1e-12);
        assert!((dlon - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_meters_to_degrees_widens_with_latitude() {
        let (dlat, dlon) = meters_to_degrees(50.0, 60.0);
        assert!((dlon - 2.0 * dlat).abs() < 1e-9);
    }

    #[test]
    fn test_line_crossing_buffer_intersects() {
        let buffer = buffer_around(Coordinate::new(39.85, -83.05), BUFFER_RADIUS_METERS);
        let line = to_line_string(&[
            Coordinate::new(39.90, -83.00),
            Coordinate::new(39.80, -83.10),
        ]);
        assert!(line_intersects_polygon(&line, &buffer));
    }

    #[test]
    fn test_line_inside_buffer_intersects() {
        let center = Coordinate::new(39.85, -83.05);
        let buffer = buffer_around(center, BUFFER_RADIUS_METERS);
        let line = to_line_string(&[center.offset(0.0001, 0.0), center.offset(-0.0001, 0.0)]);
        assert!(line_intersects_polygon(&line, &buffer));
    }

    #[test]
    fn test_line_far_from_buffer_does_not_intersect() {
        let buffer = buffer_around(Coordinate::new(39.85, -83.05), BUFFER_RADIUS_METERS);
        // East-west line about 5.5 km to the north
        let line = to_line_string(&[
            Coordinate::new(39.90, -83.00),
            Coordinate::new(39.90, -83.10),
        ]);
        assert!(!line_intersects_polygon(&line, &buffer));
    }

    #[test]
    fn test_line_just_outside_radius_does_not_intersect() {
        let center = Coordinate::new(39.85, -83.05);
        let buffer = buffer_around(center, BUFFER_RADIUS_METERS);
        let (dlat, _) = meters_to_degrees(60.0, center.lat);
        // East-west line 60 m north of the camera
        let line = to_line_string(&[
            center.offset(dlat, -0.01),
            center.offset(dlat, 0.01),
        ]);
        assert!(!line_intersects_polygon(&line, &buffer));
    }
}
