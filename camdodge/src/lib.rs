//! CamDodge - Surveillance-camera aware route planning
//!
//! This library finds the known surveillance cameras that sit close to a
//! driving route and asks a routing service for a detour around them.
//!
//! # Pipeline
//!
//! ```text
//! viewport change ──► CameraStore::refresh ──► find_cameras_on_route
//!                                                     │
//!                         RouteRecalculator ◄── plan_avoidance
//! ```
//!
//! The decision steps ([`route::find_cameras_on_route`], [`route::plan_avoidance`])
//! are pure functions. Everything that talks to the outside world (camera data,
//! routing, geocoding, map and UI) sits behind a trait so a [`session::Session`]
//! can be driven by real HTTP adapters or by in-memory test doubles.

pub mod camera;
pub mod config;
pub mod coord;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod provider;
pub mod route;
pub mod session;
pub mod surface;

pub use error::PlannerError;

/// Library version, as published in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
