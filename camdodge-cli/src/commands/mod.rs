//! CLI command implementations.

pub mod cameras;
pub mod common;
pub mod config;
pub mod plan;
