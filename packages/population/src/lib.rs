#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Population table loading and section join engine.
//!
//! Raw tables are JSON arrays keyed by the national section code. They are
//! validated on load, then joined against census section geometry by the
//! local `"DD-SSS"` identifier. Everything here is synchronous and pure
//! once the data is resident in memory.

pub mod join;
pub mod load;
pub mod summary;

use thiserror::Error;

/// Errors that can occur while loading census datasets.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a dataset file failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// File that could not be read.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A row is missing a required field.
    #[error("Row {row}: missing field '{field}'")]
    MissingField {
        /// Zero-based row or feature index.
        row: usize,
        /// Name of the missing field.
        field: String,
    },

    /// A field has the wrong JSON type or an out-of-range value.
    #[error("Row {row}: invalid value for '{field}': {value}")]
    InvalidField {
        /// Zero-based row or feature index.
        row: usize,
        /// Name of the offending field.
        field: String,
        /// The value as found in the source.
        value: String,
    },
}
