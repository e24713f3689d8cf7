//! Applies planning results to the map and UI surfaces.

use super::{MapSurface, MarkerStyle, UiSurface};
use crate::camera::Camera;

/// Thin adapter between the pure planning functions and the surfaces.
pub struct Presenter<'a> {
    map: &'a dyn MapSurface,
    ui: &'a dyn UiSurface,
}

impl<'a> Presenter<'a> {
    pub fn new(map: &'a dyn MapSurface, ui: &'a dyn UiSurface) -> Self {
        Self { map, ui }
    }

    /// Redraws the camera layer with one normal marker per camera.
    pub fn show_store(&self, cameras: &[Camera]) {
        self.map.clear_cameras();
        for camera in cameras {
            self.map.draw_camera(camera, MarkerStyle::Normal);
        }
    }

    /// Emphasizes cameras that touch the route and lists them.
    ///
    /// The list is always reset, so an empty `matches` clears it.
    pub fn highlight(&self, matches: &[Camera]) {
        for camera in matches {
            self.map.draw_camera(camera, MarkerStyle::Highlighted);
        }
        self.ui.show_cameras(matches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::ViewportBounds;
    use crate::surface::{MemoryMap, MemoryUi};

    fn map() -> MemoryMap {
        MemoryMap::new(ViewportBounds::from_edges(39.80, -83.10, 39.90, -83.00))
    }

    #[test]
    fn test_show_store_replaces_markers() {
        let map = map();
        let ui = MemoryUi::new();
        let presenter = Presenter::new(&map, &ui);

        presenter.show_store(&[Camera::at(39.85, -83.05), Camera::at(39.86, -83.06)]);
        presenter.show_store(&[Camera::at(39.87, -83.07)]);

        let markers = map.camera_markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].style, MarkerStyle::Normal);
    }

    #[test]
    fn test_highlight_draws_and_lists_every_match() {
        let map = map();
        let ui = MemoryUi::new();
        let presenter = Presenter::new(&map, &ui);
        let camera = Camera::at(39.85, -83.05);

        // Same camera matched on two alternatives
        presenter.highlight(&[camera, camera]);

        assert_eq!(map.highlighted_cameras().len(), 2);
        assert_eq!(ui.camera_list().len(), 2);
    }

    #[test]
    fn test_highlight_with_no_matches_clears_list() {
        let map = map();
        let ui = MemoryUi::new();
        let presenter = Presenter::new(&map, &ui);

        presenter.highlight(&[Camera::at(39.85, -83.05)]);
        presenter.highlight(&[]);

        assert!(ui.camera_list().is_empty());
    }
}
