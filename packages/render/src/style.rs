//! Path styles for section polygons and overlays.
//!
//! Styles use the option names of the browser map library so the emitted
//! JSON can be passed straight to it. Style functions are plain
//! `Fn(&EnrichedRecord) -> PathStyle` values, independent of any map
//! widget, and are injected into the scene builder.

use std::collections::BTreeSet;

use census_map_population_models::EnrichedRecord;
use census_map_variation_models::{ColorToken, classify_optional};
use serde::{Deserialize, Serialize};

use crate::registry::{Comparison, SectionStyle};

/// Default outline color of census sections.
pub const SECTION_OUTLINE_COLOR: &str = "#3388ff";

/// Sections inside the Distrito Centro boundary.
pub const CENTRE_SECTIONS: &[&str] = &[
    "01-001", "01-002", "01-003", "01-004", "01-005", "02-001", "02-002", "02-003", "02-005",
    "02-006", "02-007", "02-008", "02-011", "02-012", "02-013", "02-017", "02-022", "02-023",
    "02-024", "02-025", "03-010", "03-015", "03-018",
];

/// Style options for a polygon or polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    /// Stroke width in pixels.
    pub weight: f64,
    /// Stroke color.
    pub color: String,
    /// Stroke opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Stroke dash pattern; empty for solid.
    pub dash_array: String,
    /// Fill color; the stroke color is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Whether the path receives pointer events.
    pub interactive: bool,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            weight: 2.0,
            color: SECTION_OUTLINE_COLOR.to_string(),
            opacity: None,
            dash_array: String::new(),
            fill_color: None,
            fill_opacity: 0.0,
            interactive: true,
        }
    }
}

/// A style function from an enriched section to its path style.
pub type StyleFn<'a> = Box<dyn Fn(&EnrichedRecord) -> PathStyle + 'a>;

/// Blue outline without fill.
#[must_use]
pub fn outline_style() -> PathStyle {
    PathStyle::default()
}

/// Blue outline with a light blue fill.
#[must_use]
pub fn outline_filled_style() -> PathStyle {
    PathStyle {
        fill_color: Some(SECTION_OUTLINE_COLOR.to_string()),
        fill_opacity: 0.1,
        ..PathStyle::default()
    }
}

/// Color tier of a record for `comparison`, or [`ColorToken::NoData`]
/// when either year is missing.
#[must_use]
pub fn record_token(record: &EnrichedRecord, comparison: Comparison) -> ColorToken {
    #[allow(clippy::cast_precision_loss)]
    let delta = record
        .delta(comparison.baseline, comparison.compare)
        .map(|d| d as f64);
    classify_optional(delta)
}

/// Style of a choropleth-shaded section.
#[must_use]
pub fn token_style(token: ColorToken) -> PathStyle {
    let no_data = token == ColorToken::NoData;
    PathStyle {
        weight: 1.0,
        color: "white".to_string(),
        opacity: Some(1.0),
        dash_array: if no_data { "3".to_string() } else { String::new() },
        fill_color: Some(token.hex().to_string()),
        fill_opacity: if no_data { 0.4 } else { 0.7 },
        interactive: true,
    }
}

/// Returns the choropleth style function for `comparison`.
#[must_use]
pub fn choropleth_style(comparison: Comparison) -> impl Fn(&EnrichedRecord) -> PathStyle {
    move |record| token_style(record_token(record, comparison))
}

/// Returns the style function that highlights Distrito Centro sections.
#[must_use]
pub fn centre_highlight_style() -> impl Fn(&EnrichedRecord) -> PathStyle {
    let centre: BTreeSet<&'static str> = CENTRE_SECTIONS.iter().copied().collect();
    move |record| {
        let in_centre = centre.contains(record.id().as_str());
        PathStyle {
            weight: 2.0,
            color: if in_centre { "blue" } else { "green" }.to_string(),
            opacity: None,
            dash_array: String::new(),
            fill_color: Some(if in_centre { "red" } else { "green" }.to_string()),
            fill_opacity: 0.1,
            interactive: true,
        }
    }
}

/// The default style function for a section styling mode.
///
/// A choropleth without a comparison falls back to the plain outline.
#[must_use]
pub fn default_style_fn<'a>(mode: SectionStyle, comparison: Option<Comparison>) -> StyleFn<'a> {
    match (mode, comparison) {
        (SectionStyle::Choropleth, Some(comparison)) => Box::new(choropleth_style(comparison)),
        (SectionStyle::Choropleth | SectionStyle::Outline, _) => Box::new(|_| outline_style()),
        (SectionStyle::OutlineFilled, _) => Box::new(|_| outline_filled_style()),
        (SectionStyle::CentreHighlight, _) => Box::new(centre_highlight_style()),
    }
}

/// Styles applied while the pointer is over a section and after it
/// leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverStyles {
    /// Style while hovered.
    pub highlight: PathStyle,
    /// Style restored on leave; `None` restores the feature's own style.
    pub reset: Option<PathStyle>,
}

/// Hover behavior for a section styling mode.
#[must_use]
pub fn hover_styles(mode: SectionStyle) -> Option<HoverStyles> {
    match mode {
        SectionStyle::Outline => Some(HoverStyles {
            highlight: PathStyle {
                weight: 5.0,
                color: "#666".to_string(),
                fill_color: Some("#333".to_string()),
                fill_opacity: 0.3,
                ..PathStyle::default()
            },
            reset: Some(outline_style()),
        }),
        SectionStyle::OutlineFilled => Some(HoverStyles {
            highlight: PathStyle {
                weight: 3.0,
                color: "#666".to_string(),
                fill_opacity: 0.3,
                ..PathStyle::default()
            },
            reset: Some(outline_filled_style()),
        }),
        SectionStyle::Choropleth => Some(HoverStyles {
            highlight: PathStyle {
                weight: 3.0,
                color: "#666".to_string(),
                fill_opacity: 0.9,
                ..PathStyle::default()
            },
            reset: None,
        }),
        SectionStyle::CentreHighlight => None,
    }
}
