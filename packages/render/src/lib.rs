#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map scene construction for the carbon project dashboard.
//!
//! [`scene::build_scene`] turns the two source documents into a layered
//! [`MapScene`](carbon_map_render_models::MapScene): the aggregate project
//! outline, conservancy boundaries, per-category project boundaries and
//! point markers, each with resting and hover styles, tooltips and a
//! selection target. [`interaction`] resolves clicks into detail panel
//! events and [`export`] converts a scene to `GeoJSON`.

pub mod config;
pub mod export;
pub mod interaction;
pub mod scene;
pub mod viewport;

pub use config::RenderConfig;
pub use scene::build_scene;

use thiserror::Error;

/// Errors raised while loading renderer configuration.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The configuration text is not valid.
    #[error(transparent)]
    Config(#[from] toml::de::Error),
    /// The configuration file cannot be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
