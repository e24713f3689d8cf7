//! In-memory camera set for the current viewport.
//!
//! The set is replaced wholesale on every successful refresh. Cameras that
//! fall outside the new viewport are dropped even if they sit next to the
//! current route; a route that leaves the visible area is only checked
//! against the cameras that were fetched for that area.
//!
//! # Concurrency
//!
//! `refresh` takes `&self`: the source is awaited without holding any lock and
//! the new set is swapped in afterwards. A check running at the same time sees
//! either the old or the new set, never a mix.

use std::sync::Arc;

use parking_lot::RwLock;

use super::Camera;
use crate::coord::ViewportBounds;
use crate::provider::{CameraSource, FetchError};

/// The cameras known for the most recently fetched viewport.
#[derive(Debug)]
pub struct CameraStore {
    cameras: RwLock<Arc<[Camera]>>,
}

impl Default for CameraStore {
    fn default() -> Self {
        Self {
            cameras: RwLock::new(Arc::from(Vec::new())),
        }
    }
}

impl CameraStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set with the cameras `source` reports inside `bounds`.
    ///
    /// On failure the previous set is left untouched and the error returned.
    pub async fn refresh<S: CameraSource>(
        &self,
        bounds: &ViewportBounds,
        source: &S,
    ) -> Result<Arc<[Camera]>, FetchError> {
        match source.fetch_cameras(bounds).await {
            Ok(cameras) => {
                tracing::info!(
                    source = source.name(),
                    count = cameras.len(),
                    %bounds,
                    "Camera set refreshed"
                );
                Ok(self.replace(cameras))
            }
            Err(e) => {
                tracing::error!(source = source.name(), error = %e, "Error fetching camera data");
                Err(e)
            }
        }
    }

    fn replace(&self, cameras: Vec<Camera>) -> Arc<[Camera]> {
        let cameras: Arc<[Camera]> = cameras.into();
        *self.cameras.write() = Arc::clone(&cameras);
        cameras
    }

    /// Returns the current set. The snapshot is unaffected by later refreshes.
    pub fn snapshot(&self) -> Arc<[Camera]> {
        Arc::clone(&self.cameras.read())
    }

    pub fn len(&self) -> usize {
        self.cameras.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
