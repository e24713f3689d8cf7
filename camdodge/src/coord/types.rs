//! Coordinate and bounding box types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when building or parsing coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is NaN or infinite.
    #[error("Invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude is NaN or infinite.
    #[error("Invalid longitude: {0}")]
    InvalidLongitude(f64),

    /// Text could not be parsed as a coordinate pair or bounding box.
    #[error("Cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// A WGS84 position in degrees.
///
/// No range validation is performed beyond rejecting non-finite values;
/// routing and camera services are trusted to clamp out-of-range input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate without validation.
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a coordinate, rejecting NaN or infinite components.
    pub fn checked(lat: f64, lon: f64) -> Result<Self, CoordError> {
        let coord = Self::new(lat, lon);
        coord.validate()?;
        Ok(coord)
    }

    /// Returns true when both components are finite numbers.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Validates both components, reporting the first bad one.
    pub fn validate(&self) -> Result<(), CoordError> {
        if !self.lat.is_finite() {
            return Err(CoordError::InvalidLatitude(self.lat));
        }
        if !self.lon.is_finite() {
            return Err(CoordError::InvalidLongitude(self.lon));
        }
        Ok(())
    }

    /// Returns this position shifted by the given degree offsets.
    #[inline]
    pub fn offset(&self, dlat: f64, dlon: f64) -> Self {
        Self::new(self.lat + dlat, self.lon + dlon)
    }

    /// Converts to a `geo` coordinate (x = longitude, y = latitude).
    #[inline]
    pub fn to_geo(self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    /// Converts from a `geo` coordinate (x = longitude, y = latitude).
    #[inline]
    pub fn from_geo(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// The rectangular area currently visible on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    /// South-west corner.
    pub south_west: Coordinate,
    /// North-east corner.
    pub north_east: Coordinate,
}

impl ViewportBounds {
    /// Creates bounds from the two corners.
    pub fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from `south, west, north, east` values.
    pub fn from_edges(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(Coordinate::new(south, west), Coordinate::new(north, east))
    }

    /// Fits a box around the given points, widened by `padding_deg` on every side.
    ///
    /// Returns `None` when `points` is empty.
    pub fn around(points: &[Coordinate], padding_deg: f64) -> Option<Self> {
        let first = points.first()?;
        let (mut south, mut west, mut north, mut east) =
            (first.lat, first.lon, first.lat, first.lon);

        for point in &points[1..] {
            south = south.min(point.lat);
            north = north.max(point.lat);
            west = west.min(point.lon);
            east = east.max(point.lon);
        }

        Some(Self::from_edges(
            south - padding_deg,
            west - padding_deg,
            north + padding_deg,
            east + padding_deg,
        ))
    }

    #[inline]
    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    #[inline]
    pub fn west(&self) -> f64 {
        self.south_west.lon
    }

    #[inline]
    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    #[inline]
    pub fn east(&self) -> f64 {
        self.north_east.lon
    }

    /// Returns true if the point lies inside or on the edge of the box.
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.south()..=self.north()).contains(&point.lat)
            && (self.west()..=self.east()).contains(&point.lon)
    }
}

impl fmt::Display for ViewportBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4},{:.4} .. {:.4},{:.4}]",
            self.south(),
            self.west(),
            self.north(),
            self.east()
        )
    }
}
