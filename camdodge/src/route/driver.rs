//! Route recalculation driver.

use crate::coord::Coordinate;
use crate::error::PlannerError;
use crate::provider::RoutingService;
use crate::route::Route;
use crate::surface::MapSurface;

/// Requests routes through a waypoint list and draws them.
#[derive(Debug)]
pub struct RouteRecalculator<R> {
    routing: R,
}

impl<R: RoutingService> RouteRecalculator<R> {
    pub fn new(routing: R) -> Self {
        Self { routing }
    }

    /// The wrapped routing service.
    pub fn routing(&self) -> &R {
        &self.routing
    }

    /// Routes through `waypoints` and draws every usable alternative on `map`.
    ///
    /// Alternatives are added on top of whatever is already drawn. An
    /// alternative without usable geometry is logged and skipped. A failed
    /// request is logged and returned; there is no retry.
    ///
    /// Fails with [`PlannerError::InvalidWaypoints`] without contacting the
    /// service when fewer than two waypoints are given or either of the first
    /// two is not finite.
    pub async fn recalculate(
        &self,
        waypoints: &[Coordinate],
        map: &dyn MapSurface,
    ) -> Result<Vec<Route>, PlannerError> {
        validate_waypoints(waypoints).inspect_err(|e| {
            tracing::error!(error = %e, "Invalid waypoints or missing lat/lng data");
        })?;

        for (index, waypoint) in waypoints.iter().enumerate() {
            tracing::debug!(index, %waypoint, "Waypoint");
        }

        let alternatives = self.routing.route(waypoints).await.inspect_err(|e| {
            tracing::error!(service = self.routing.name(), error = %e, "Error recalculating route");
        })?;

        let mut routes = Vec::with_capacity(alternatives.len());
        for (index, alternative) in alternatives.into_iter().enumerate() {
            match Route::try_from(alternative) {
                Ok(route) => {
                    map.draw_route(&route);
                    routes.push(route);
                }
                Err(e) => tracing::warn!(alternative = index, error = %e, "Skipping route alternative"),
            }
        }

        if routes.is_empty() {
            tracing::warn!(service = self.routing.name(), "No route found");
        } else {
            tracing::info!(
                service = self.routing.name(),
                routes = routes.len(),
                waypoints = waypoints.len(),
                "Route recalculated"
            );
        }
        Ok(routes)
    }
}

fn validate_waypoints(waypoints: &[Coordinate]) -> Result<(), PlannerError> {
    if waypoints.len() < 2 {
        return Err(PlannerError::InvalidWaypoints(format!(
            "expected at least 2 waypoints, got {}",
            waypoints.len()
        )));
    }
    if let Some(bad) = waypoints[..2].iter().find(|w| !w.is_valid()) {
        return Err(PlannerError::InvalidWaypoints(format!(
            "waypoint {:?} has no usable lat/lon",
            bad
        )));
    }
    Ok(())
}
