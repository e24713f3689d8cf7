//! In-memory map and UI surfaces.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{MapSurface, MarkerStyle, UiSurface};
use crate::camera::Camera;
use crate::coord::ViewportBounds;
use crate::route::Route;

/// A camera marker as drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraMarker {
    pub camera: Camera,
    pub style: MarkerStyle,
}

#[derive(Debug)]
struct MapLayers {
    viewport: ViewportBounds,
    cameras: Vec<CameraMarker>,
    routes: Vec<Route>,
}

/// A map that records its layers instead of rendering them.
#[derive(Debug)]
pub struct MemoryMap {
    layers: Mutex<MapLayers>,
}

impl MemoryMap {
    /// Creates an empty map showing `viewport`.
    pub fn new(viewport: ViewportBounds) -> Self {
        Self {
            layers: Mutex::new(MapLayers {
                viewport,
                cameras: Vec::new(),
                routes: Vec::new(),
            }),
        }
    }

    /// Every camera marker currently drawn.
    pub fn camera_markers(&self) -> Vec<CameraMarker> {
        self.layers.lock().cameras.clone()
    }

    /// Cameras drawn with the highlighted style.
    pub fn highlighted_cameras(&self) -> Vec<Camera> {
        self.layers
            .lock()
            .cameras
            .iter()
            .filter(|m| m.style == MarkerStyle::Highlighted)
            .map(|m| m.camera)
            .collect()
    }
}

impl MapSurface for MemoryMap {
    fn viewport(&self) -> ViewportBounds {
        self.layers.lock().viewport
    }

    fn fit_bounds(&self, bounds: ViewportBounds) {
        tracing::trace!(%bounds, "Viewport moved");
        self.layers.lock().viewport = bounds;
    }

    fn draw_camera(&self, camera: &Camera, style: MarkerStyle) {
        self.layers.lock().cameras.push(CameraMarker {
            camera: *camera,
            style,
        });
    }

    fn clear_cameras(&self) {
        self.layers.lock().cameras.clear();
    }

    fn draw_route(&self, route: &Route) {
        self.layers.lock().routes.push(route.clone());
    }

    fn clear_routes(&self) {
        self.layers.lock().routes.clear();
    }

    fn routes(&self) -> Vec<Route> {
        self.layers.lock().routes.clone()
    }
}

/// A UI that records loading state, the camera list and notifications.
#[derive(Debug, Default)]
pub struct MemoryUi {
    loading: AtomicBool,
    transitions: AtomicUsize,
    camera_list: Mutex<Vec<String>>,
    notifications: Mutex<Vec<String>>,
}

impl MemoryUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// How many times the loading indicator was switched on or off.
    pub fn loading_transitions(&self) -> usize {
        self.transitions.load(Ordering::SeqCst)
    }

    /// Entries of the results list, formatted for display.
    pub fn camera_list(&self) -> Vec<String> {
        self.camera_list.lock().clone()
    }

    /// Notifications shown so far, oldest first.
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().clone()
    }
}

impl UiSurface for MemoryUi {
    fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
        self.transitions.fetch_add(1, Ordering::SeqCst);
    }

    fn show_cameras(&self, cameras: &[Camera]) {
        *self.camera_list.lock() = cameras.iter().map(Camera::to_string).collect();
    }

    fn notify(&self, message: &str) {
        self.notifications.lock().push(message.to_string());
    }
}
