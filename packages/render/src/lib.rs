#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map scene construction for census section views.
//!
//! Turns joined census data into a [`scene::MapScene`]: section polygons
//! with per-feature styles, variation markers, boundary overlays, a tier
//! legend and a hover info control. Nothing here depends on a particular
//! map widget; a [`session::MapBackend`] mounts the finished scene.

pub mod info;
pub mod marker;
pub mod perimeter;
pub mod registry;
pub mod scene;
pub mod session;
pub mod style;

use thiserror::Error;

/// Errors that can occur while loading overlay data or mounting a scene.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Reading an overlay file failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The scene has no container to mount into.
    #[error("Map container id is missing")]
    MissingContainer,

    /// The map backend failed to draw the scene.
    #[error("Map backend error: {0}")]
    Backend(String),
}
