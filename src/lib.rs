//! Beadsprite - turn pixel-art screenshots into fuse-bead patterns.
//!
//! HTTP service and CLI around the `pixel_grid` pipeline.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
