//! Map and UI collaborators.
//!
//! The planning core never draws anything itself. It hands its results to a
//! [`MapSurface`] (markers, route lines, viewport) and a [`UiSurface`]
//! (loading indicator, results list, user notifications) through the
//! [`Presenter`]. Both traits use `&self` methods; implementations own their
//! interior mutability so a surface can be shared between the camera refresh
//! flow and the route recalculation flow.
//!
//! [`MemoryMap`] and [`MemoryUi`] keep everything in memory and back both the
//! terminal shell and the tests.

mod memory;
mod presenter;

pub use memory::{CameraMarker, MemoryMap, MemoryUi};
pub use presenter::Presenter;

use crate::camera::Camera;
use crate::coord::ViewportBounds;
use crate::route::Route;

/// How a camera marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Small marker for every camera in the viewport.
    Normal,
    /// Enlarged marker for a camera that touches the route.
    Highlighted,
}

impl MarkerStyle {
    /// Marker radius in screen pixels.
    pub fn radius(&self) -> u8 {
        match self {
            MarkerStyle::Normal => 3,
            MarkerStyle::Highlighted => 7,
        }
    }

    /// Outline weight in screen pixels.
    pub fn weight(&self) -> u8 {
        match self {
            MarkerStyle::Normal => 1,
            MarkerStyle::Highlighted => 3,
        }
    }
}

/// The map the session draws onto.
pub trait MapSurface: Send + Sync {
    /// Currently visible area.
    fn viewport(&self) -> ViewportBounds;

    /// Moves the viewport so `bounds` is visible.
    fn fit_bounds(&self, bounds: ViewportBounds);

    /// Adds a camera marker.
    fn draw_camera(&self, camera: &Camera, style: MarkerStyle);

    /// Removes every camera marker.
    fn clear_cameras(&self);

    /// Adds a route line.
    fn draw_route(&self, route: &Route);

    /// Removes every route line.
    fn clear_routes(&self);

    /// Enumerates the route lines currently drawn, oldest first.
    fn routes(&self) -> Vec<Route>;
}

/// Form-level UI sinks.
pub trait UiSurface: Send + Sync {
    /// Shows or hides the loading indicator.
    fn set_loading(&self, loading: bool);

    /// Replaces the list of cameras that touch the route.
    fn show_cameras(&self, cameras: &[Camera]);

    /// Shows a blocking notification to the user.
    fn notify(&self, message: &str);
}

/// Shows the loading indicator for as long as the guard lives.
///
/// Dropping the guard clears the indicator on every exit path, including
/// early returns through `?`.
pub struct LoadingGuard<'a> {
    ui: &'a dyn UiSurface,
}

impl<'a> LoadingGuard<'a> {
    pub fn new(ui: &'a dyn UiSurface) -> Self {
        ui.set_loading(true);
        Self { ui }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.ui.set_loading(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails(ui: &MemoryUi) -> Result<(), &'static str> {
        let _loading = LoadingGuard::new(ui);
        assert!(ui.is_loading());
        Err::<(), _>("boom")?;
        Ok(())
    }

    #[test]
    fn test_loading_guard_clears_on_error_path() {
        let ui = MemoryUi::new();
        assert!(fails(&ui).is_err());
        assert!(!ui.is_loading());
        assert_eq!(ui.loading_transitions(), 2);
    }

    #[test]
    fn test_loading_guard_clears_on_scope_exit() {
        let ui = MemoryUi::new();
        {
            let _loading = LoadingGuard::new(&ui);
            assert!(ui.is_loading());
        }
        assert!(!ui.is_loading());
    }

    #[test]
    fn test_marker_styles() {
        assert_eq!(MarkerStyle::Normal.radius(), 3);
        assert_eq!(MarkerStyle::Highlighted.radius(), 7);
        assert_eq!(MarkerStyle::Highlighted.weight(), 3);
    }
}
