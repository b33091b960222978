//! Dataset locations, read from a TOML file.
//!
//! Relative paths are resolved against `data_dir`, which can be overridden
//! with the `CENSUS_MAP_DATA_DIR` environment variable.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use census_map_section_models::CensusYear;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding [`DatasetConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "CENSUS_MAP_DATA_DIR";

/// Errors that can occur while reading the dataset configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Config file path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DatasetConfig`].
    #[error("Config error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No population table is configured for a year a command needs.
    #[error("No population table configured for {year}")]
    MissingTable {
        /// The missing year.
        year: CensusYear,
    },
}

/// Paths of every dataset the maps are built from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatasetConfig {
    /// Base directory for relative paths.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Census section `GeoJSON`.
    pub sections: PathBuf,
    /// Population table per census year.
    #[serde(default)]
    pub tables: BTreeMap<CensusYear, PathBuf>,
    /// Distrito Centro outline.
    #[serde(default)]
    pub district_centre: Option<PathBuf>,
    /// Real perimeter `FeatureCollection`.
    #[serde(default)]
    pub real_perimeter: Option<PathBuf>,
    /// Intramuros perimeter `FeatureCollection`.
    #[serde(default)]
    pub intramuros_perimeter: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl DatasetConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the text is not a valid config.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Reads the config at `path` and applies the environment override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&text)?.with_data_dir_override(std::env::var(DATA_DIR_ENV).ok());
        log::debug!("Loaded dataset config from {}", path.display());
        Ok(config)
    }

    /// Replaces `data_dir` when `value` is set and non-empty.
    #[must_use]
    pub fn with_data_dir_override(mut self, value: Option<String>) -> Self {
        if let Some(dir) = value.filter(|v| !v.trim().is_empty()) {
            log::info!("Using data directory {dir} from {DATA_DIR_ENV}");
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    /// Resolves a configured path against `data_dir`.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Resolved path of the table for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTable`] if no table is configured.
    pub fn table_path(&self, year: CensusYear) -> Result<PathBuf, ConfigError> {
        self.tables
            .get(&year)
            .map(|p| self.resolve(p))
            .ok_or(ConfigError::MissingTable { year })
    }
}
