//! Planning session.
//!
//! A [`Session`] is the explicit context that ties the camera store, the
//! external services and the map and UI surfaces together. It exposes the
//! three user-facing flows:
//!
//! | Flow                           | Trigger                          |
//! |--------------------------------|----------------------------------|
//! | [`Session::refresh_cameras`]   | the viewport moved               |
//! | [`Session::set_endpoints`]     | new start/end coordinates        |
//! | [`Session::set_endpoints_by_address`] | new start/end addresses   |
//!
//! Each flow shows the loading indicator for its whole duration and clears
//! it on every exit path. Failures are logged and returned; nothing panics.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::camera::{Camera, CameraStore};
use crate::config::ConfigFile;
use crate::coord::{Coordinate, ViewportBounds};
use crate::error::PlannerError;
use crate::provider::{CameraSource, Geocoder, RoutingService, StructuredAddress};
use crate::route::{
    find_cameras_on_route, plan_avoidance_with, AvoidanceStrategy, Route, RouteRecalculator,
    VertexOffsetStrategy, WaypointList, AVOIDANCE_OFFSET_DEGREES,
};
use crate::surface::{LoadingGuard, MapSurface, Presenter, UiSurface};

/// Default padding around the endpoints when fitting the viewport, in degrees.
pub const DEFAULT_PADDING_DEGREES: f64 = 0.02;

/// Tunables for a planning session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Diagonal offset applied to each avoidance point.
    pub offset_degrees: f64,
    /// How many times recalculated routes are re-checked for cameras.
    ///
    /// `0` checks once and trusts the recalculated routes.
    pub verify_passes: u32,
    /// Padding added around the endpoints when fitting the viewport.
    pub padding_degrees: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            offset_degrees: AVOIDANCE_OFFSET_DEGREES,
            verify_passes: 0,
            padding_degrees: DEFAULT_PADDING_DEGREES,
        }
    }
}

impl SessionConfig {
    /// Builds session settings from the loaded configuration file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self {
            offset_degrees: config.avoidance.offset_degrees,
            verify_passes: config.avoidance.verify_passes,
            padding_degrees: config.viewport.padding_degrees,
        }
    }

    pub fn with_verify_passes(mut self, passes: u32) -> Self {
        self.verify_passes = passes;
        self
    }
}

/// Outcome of one route check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvoidanceReport {
    /// Cameras touching the checked routes, once per touching route.
    pub matches: Vec<Camera>,
    /// The waypoint list sent for recalculation.
    pub waypoints: WaypointList,
    /// Routes returned by the recalculation; empty when nothing was flagged.
    pub routes: Vec<Route>,
    /// Recalculations performed, including re-check passes.
    pub recalculations: u32,
}

impl AvoidanceReport {
    /// True when the checked routes touched no camera.
    pub fn is_clear(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Explicit context for one user's planning session.
pub struct Session<S, R, G> {
    source: S,
    recalculator: RouteRecalculator<R>,
    geocoder: G,
    store: CameraStore,
    map: Arc<dyn MapSurface>,
    ui: Arc<dyn UiSurface>,
    strategy: Box<dyn AvoidanceStrategy>,
    endpoints: Mutex<Option<(Coordinate, Coordinate)>>,
    config: SessionConfig,
}

impl<S, R, G> Session<S, R, G>
where
    S: CameraSource,
    R: RoutingService,
    G: Geocoder,
{
    pub fn new(
        source: S,
        routing: R,
        geocoder: G,
        map: Arc<dyn MapSurface>,
        ui: Arc<dyn UiSurface>,
        config: SessionConfig,
    ) -> Self {
        Self {
            source,
            recalculator: RouteRecalculator::new(routing),
            geocoder,
            store: CameraStore::new(),
            map,
            ui,
            strategy: Box::new(VertexOffsetStrategy::new(config.offset_degrees)),
            endpoints: Mutex::new(None),
            config,
        }
    }

    /// Replaces the avoidance heuristic.
    pub fn with_strategy(mut self, strategy: Box<dyn AvoidanceStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The cameras fetched for the current viewport.
    pub fn cameras(&self) -> Arc<[Camera]> {
        self.store.snapshot()
    }

    /// The current start and end, if set.
    pub fn endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        *self.endpoints.lock()
    }

    fn presenter(&self) -> Presenter<'_> {
        Presenter::new(self.map.as_ref(), self.ui.as_ref())
    }

    /// Refetches cameras for the current viewport and redraws them.
    ///
    /// When a route is already drawn it is checked against the new set and
    /// the report returned. A failed fetch leaves the previous set in place.
    pub async fn refresh_cameras(&self) -> Result<Option<AvoidanceReport>, PlannerError> {
        let _loading = LoadingGuard::new(self.ui.as_ref());
        self.refresh_and_check().await
    }

    /// Routes from `start` to `end`, fits the viewport and checks for cameras.
    ///
    /// Previously drawn routes are removed first. Returns `Ok(None)` when the
    /// routing service found no base route to check.
    pub async fn set_endpoints(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Option<AvoidanceReport>, PlannerError> {
        let _loading = LoadingGuard::new(self.ui.as_ref());
        self.route_between(start, end).await
    }

    /// Geocodes both addresses, then behaves like [`Session::set_endpoints`].
    ///
    /// Both lookups run concurrently. A failed lookup is shown to the user
    /// through the UI surface.
    pub async fn set_endpoints_by_address(
        &self,
        start: &StructuredAddress,
        end: &StructuredAddress,
    ) -> Result<Option<AvoidanceReport>, PlannerError> {
        let _loading = LoadingGuard::new(self.ui.as_ref());

        let (start, end) = futures::try_join!(self.geocode(start), self.geocode(end))?;
        self.route_between(start, end).await
    }

    /// Checks the drawn routes against the camera set and routes around any hits.
    pub async fn check_route(&self) -> Result<AvoidanceReport, PlannerError> {
        let _loading = LoadingGuard::new(self.ui.as_ref());
        self.check_drawn_routes().await
    }

    async fn geocode(&self, address: &StructuredAddress) -> Result<Coordinate, PlannerError> {
        match self.geocoder.geocode(address).await {
            Ok(coordinate) => {
                tracing::debug!(%address, %coordinate, "Address resolved");
                Ok(coordinate)
            }
            Err(e) => {
                tracing::error!(%address, error = %e, "Geocoding failed");
                self.ui.notify(&format!("Could not find address: {}", address));
                Err(e.into())
            }
        }
    }

    async fn route_between(
        &self,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<Option<AvoidanceReport>, PlannerError> {
        start.validate().inspect_err(|e| {
            tracing::error!(error = %e, "Invalid coordinates provided");
        })?;
        end.validate().inspect_err(|e| {
            tracing::error!(error = %e, "Invalid coordinates provided");
        })?;

        self.map.clear_routes();
        *self.endpoints.lock() = Some((start, end));

        let base = self.recalculator.recalculate(&[start, end], self.map.as_ref()).await?;
        tracing::info!(%start, %end, alternatives = base.len(), "Base route computed");

        if let Some(bounds) = ViewportBounds::around(&[start, end], self.config.padding_degrees) {
            self.map.fit_bounds(bounds);
        }

        self.refresh_and_check().await
    }

    async fn refresh_and_check(&self) -> Result<Option<AvoidanceReport>, PlannerError> {
        let bounds = self.map.viewport();
        let cameras = self.store.refresh(&bounds, &self.source).await?;
        self.presenter().show_store(&cameras);

        if self.endpoints().is_none() || self.map.routes().is_empty() {
            return Ok(None);
        }
        self.check_drawn_routes().await.map(Some)
    }

    async fn check_drawn_routes(&self) -> Result<AvoidanceReport, PlannerError> {
        let (start, end) = self.endpoints().ok_or_else(|| {
            tracing::error!("Waypoints not set properly");
            PlannerError::InvalidWaypoints("start and end are not set".to_string())
        })?;

        let cameras = self.store.snapshot();
        let mut matches = find_cameras_on_route(&self.map.routes(), &cameras)?;
        self.presenter().highlight(&matches);

        let mut waypoints = WaypointList::new(start, end);
        if matches.is_empty() {
            tracing::info!(cameras = cameras.len(), "No cameras on the route");
            return Ok(AvoidanceReport {
                matches,
                waypoints,
                routes: Vec::new(),
                recalculations: 0,
            });
        }

        waypoints = plan_avoidance_with(self.strategy.as_ref(), &matches, start, end);
        let mut routes = self
            .recalculator
            .recalculate(waypoints.as_slice(), self.map.as_ref())
            .await?;
        let mut recalculations = 1;

        for pass in 1..=self.config.verify_passes {
            if routes.is_empty() {
                break;
            }
            let remaining = find_cameras_on_route(&routes, &cameras)?;
            if remaining.is_empty() {
                tracing::debug!(pass, "Recalculated routes are clear");
                break;
            }

            tracing::info!(pass, cameras = remaining.len(), "Recalculated routes still touch cameras");
            let detours = plan_avoidance_with(self.strategy.as_ref(), &remaining, start, end);
            for via in detours.vias() {
                waypoints.push_via(*via);
            }
            matches.extend(remaining);
            self.presenter().highlight(&matches);

            routes = self
                .recalculator
                .recalculate(waypoints.as_slice(), self.map.as_ref())
                .await?;
            recalculations += 1;
        }

        Ok(AvoidanceReport {
            matches,
            waypoints,
            routes,
            recalculations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.offset_degrees, 0.005);
        assert_eq!(config.verify_passes, 0);
        assert_eq!(config.padding_degrees, 0.02);
    }

    #[test]
    fn test_session_config_from_config_file() {
        let mut file = ConfigFile::default();
        file.avoidance.verify_passes = 3;
        file.avoidance.offset_degrees = 0.01;
        file.viewport.padding_degrees = 0.1;

        let config = SessionConfig::from_config_file(&file);
        assert_eq!(config.verify_passes, 3);
        assert_eq!(config.offset_degrees, 0.01);
        assert_eq!(config.padding_degrees, 0.1);
    }

    #[test]
    fn test_report_is_clear() {
        let report = AvoidanceReport {
            matches: vec![],
            waypoints: WaypointList::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)),
            routes: vec![],
            recalculations: 0,
        };
        assert!(report.is_clear());
    }
}
