//! Compile-time registry of map view definitions.
//!
//! Each map variant is described by a TOML file under `views/`, embedded
//! via `include_str!`. The definition says which census years are compared,
//! how the join treats missing data, how sections are styled and which
//! extra layers are drawn.

use census_map_population_models::JoinPolicy;
use census_map_section_models::CensusYear;
use census_map_view_state::MapVariant;
use serde::{Deserialize, Serialize};

/// A map view definition loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewDefinition {
    /// Variant this definition describes.
    pub variant: MapVariant,
    /// Navigation label.
    pub title: String,
    /// Second navigation line, if any.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// DOM id of the element the map is mounted into.
    pub container: String,
    /// How sections missing from a table are handled.
    #[serde(default)]
    pub join_policy: JoinPolicy,
    /// How the section layer is styled.
    pub section_style: SectionStyle,
    /// Years compared by this view, if it shows population data.
    #[serde(default)]
    pub comparison: Option<Comparison>,
    /// Initial map options.
    pub map: MapOptions,
    /// Which extra layers are drawn.
    pub layers: LayerFlags,
}

/// A baseline/compare census year pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Earlier year.
    pub baseline: CensusYear,
    /// Later year.
    pub compare: CensusYear,
}

/// Section layer styling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStyle {
    /// Filled by variation tier.
    Choropleth,
    /// Blue outline, no fill.
    Outline,
    /// Blue outline with a light blue fill.
    OutlineFilled,
    /// Green outlines with Distrito Centro sections highlighted.
    CentreHighlight,
}

/// Initial map viewport and zoom limits.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    /// `[lat, lng]` of the initial center.
    pub center: [f64; 2],
    /// Initial zoom.
    pub zoom: u8,
    /// Minimum zoom.
    #[serde(alias = "min_zoom")]
    pub min_zoom: u8,
    /// Maximum zoom.
    #[serde(alias = "max_zoom")]
    pub max_zoom: u8,
    /// Whether the zoom buttons are shown.
    #[serde(alias = "zoom_control")]
    pub zoom_control: bool,
}

/// Which optional layers a view draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct LayerFlags {
    /// Variation markers at section label points.
    #[serde(default)]
    pub markers: bool,
    /// Tier legend.
    #[serde(default)]
    pub legend: bool,
    /// Hover information control.
    #[serde(default)]
    pub info_control: bool,
    /// Distrito Centro outline.
    #[serde(default)]
    pub district_centre: bool,
    /// Real perimeter from the union of the selected sections.
    #[serde(default)]
    pub real_perimeter: bool,
    /// Intramuros (historic walls) perimeter.
    #[serde(default)]
    pub intramuros_perimeter: bool,
}

// ── Compile-time embedded TOML files ────────────────────────────────

const VIEW_TOMLS: &[(&str, &str)] = &[
    ("population", include_str!("../views/population.toml")),
    ("variation", include_str!("../views/variation.toml")),
    ("basic", include_str!("../views/basic.toml")),
    ("distritos", include_str!("../views/distritos.toml")),
];

#[cfg(test)]
const EXPECTED_VIEW_COUNT: usize = 4;

/// Returns every registered view definition, in navigation order.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught by the tests below.
#[must_use]
pub fn all_views() -> Vec<ViewDefinition> {
    VIEW_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse view definition '{name}': {e}"))
        })
        .collect()
}

/// Returns the definition for `variant`.
#[must_use]
pub fn view(variant: MapVariant) -> Option<ViewDefinition> {
    all_views().into_iter().find(|v| v.variant == variant)
}
