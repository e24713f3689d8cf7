//! Surveillance cameras and the per-viewport camera store.

mod store;

pub use store::CameraStore;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

/// A known surveillance camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Where the camera is mounted.
    pub position: Coordinate,
    /// OpenStreetMap node id, when the camera came from OSM.
    pub osm_id: Option<u64>,
}

impl Camera {
    /// Creates a camera at `position` without an OSM id.
    pub fn new(position: Coordinate) -> Self {
        Self {
            position,
            osm_id: None,
        }
    }

    /// Creates a camera at `(lat, lon)`.
    pub fn at(lat: f64, lon: f64) -> Self {
        Self::new(Coordinate::new(lat, lon))
    }

    /// Attaches an OpenStreetMap node id.
    pub fn with_osm_id(mut self, id: u64) -> Self {
        self.osm_id = Some(id);
        self
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Camera at {}", self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_display_uses_four_decimals() {
        let camera = Camera::at(39.853712, -83.049999);
        assert_eq!(camera.to_string(), "Camera at (39.8537, -83.0500)");
    }

    #[test]
    fn test_with_osm_id() {
        let camera = Camera::at(1.0, 2.0).with_osm_id(42);
        assert_eq!(camera.osm_id, Some(42));
        assert_eq!(camera.position, Coordinate::new(1.0, 2.0));
    }
}
