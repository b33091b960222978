#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census section identifiers and geometry types.
//!
//! A census section is the smallest administrative reporting unit. Every
//! dataset in the viewer is keyed by its local `"DD-SSS"` identifier
//! (two-digit district, three-digit section), which the [`codec`] module
//! derives from the 10-digit national census code.

pub mod codec;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Local district-section identifier, e.g. `"01-001"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Builds an identifier from its district and section parts.
    #[must_use]
    pub fn new(district: &str, section: &str) -> Self {
        Self(format!("{district}-{section}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// District part (before the `-`).
    ///
    /// Returns the whole identifier if it carries no separator.
    #[must_use]
    pub fn district(&self) -> &str {
        self.0.split_once('-').map_or(self.0.as_str(), |(d, _)| d)
    }

    /// Section part (after the `-`), empty if there is no separator.
    #[must_use]
    pub fn section(&self) -> &str {
        self.0.split_once('-').map_or("", |(_, s)| s)
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Census years for which population tables exist.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum CensusYear {
    /// 2004 municipal register.
    #[serde(rename = "2004")]
    #[strum(serialize = "2004")]
    Y2004,
    /// 2011 census.
    #[serde(rename = "2011")]
    #[strum(serialize = "2011")]
    Y2011,
    /// 2022 municipal register.
    #[serde(rename = "2022")]
    #[strum(serialize = "2022")]
    Y2022,
    /// 2024 municipal register.
    #[serde(rename = "2024")]
    #[strum(serialize = "2024")]
    Y2024,
}

impl CensusYear {
    /// Returns the calendar year.
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::Y2004 => 2004,
            Self::Y2011 => 2011,
            Self::Y2022 => 2022,
            Self::Y2024 => 2024,
        }
    }

    /// Looks up a census year by calendar year.
    #[must_use]
    pub const fn from_value(value: u16) -> Option<Self> {
        match value {
            2004 => Some(Self::Y2004),
            2011 => Some(Self::Y2011),
            2022 => Some(Self::Y2022),
            2024 => Some(Self::Y2024),
            _ => None,
        }
    }

    /// Name of the population column for this year in the raw tables.
    #[must_use]
    pub fn population_column(self) -> String {
        format!("Población {}", self.value())
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Y2004, Self::Y2011, Self::Y2022, Self::Y2024]
    }
}

/// A single census section loaded from the geometry source.
///
/// Immutable once loaded; the `id` comes straight from the feature's `ID`
/// property and is not derived through the codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CensusSection {
    /// Local identifier (`"DD-SSS"`).
    pub id: SectionId,
    /// Boundary geometry, if the feature has one.
    pub geometry: Option<geojson::Geometry>,
    /// Label point latitude.
    pub latitude: Option<f64>,
    /// Label point longitude.
    pub longitude: Option<f64>,
    /// Section name, when the geometry source carries one.
    pub name: Option<String>,
}

impl CensusSection {
    /// Returns the label point as `(lat, lng)` when both coordinates are
    /// present and non-zero.
    ///
    /// Zero is treated as missing because the source data uses `0` as a
    /// placeholder for sections that were never geocoded.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if is_usable(lat) && is_usable(lng) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Whether [`Self::coordinates`] would return a point.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.coordinates().is_some()
    }
}

fn is_usable(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}
