//! Variation markers placed at section label points.

use census_map_population_models::{EnrichedRecord, VariationResult, signed_delta};
use census_map_variation_models::{MARKER_SHADOW_URL, MarkerTone, classify_marker};
use serde::{Deserialize, Serialize};

use crate::registry::Comparison;

/// Marker icon image and geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    /// Icon image URL.
    pub icon_url: String,
    /// Shadow image URL.
    pub shadow_url: String,
    /// Icon size in pixels.
    pub icon_size: [u32; 2],
    /// Point of the icon placed on the coordinate.
    pub icon_anchor: [i32; 2],
    /// Popup offset from the anchor.
    pub popup_anchor: [i32; 2],
    /// Shadow size in pixels.
    pub shadow_size: [u32; 2],
}

impl IconSpec {
    /// The standard pin icon for `tone`.
    #[must_use]
    pub fn for_tone(tone: MarkerTone) -> Self {
        Self {
            icon_url: tone.icon_url(),
            shadow_url: MARKER_SHADOW_URL.to_string(),
            icon_size: [25, 41],
            icon_anchor: [12, 41],
            popup_anchor: [1, -34],
            shadow_size: [41, 41],
        }
    }
}

/// A marker with popup and permanent tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    /// Section the marker belongs to.
    pub section_id: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Three-way variation tone.
    pub tone: MarkerTone,
    /// Icon to draw.
    pub icon: IconSpec,
    /// Popup HTML.
    pub popup: String,
    /// Permanent tooltip text (signed delta).
    pub tooltip: String,
    /// CSS class of the tooltip.
    pub tooltip_class: String,
    /// Population variation.
    pub delta: i64,
}

/// Popup HTML describing a variation.
#[must_use]
pub fn variation_popup(name: &str, variation: &VariationResult) -> String {
    format!(
        "<h4>{id} - {name}</h4>\
         <p><strong>Población {baseline_year}:</strong> {baseline}</p>\
         <p><strong>Población {compare_year}:</strong> {compare}</p>\
         <p><strong>Variación:</strong> {delta}</p>\
         <p><strong>Porcentaje:</strong> {percent}</p>",
        id = variation.section_id,
        baseline_year = variation.baseline_year,
        baseline = variation.baseline_population,
        compare_year = variation.compare_year,
        compare = variation.compare_population,
        delta = signed_delta(variation.delta),
        percent = variation.percent_delta,
    )
}

/// Builds the marker for `record`, if it has both years and usable
/// coordinates.
#[must_use]
pub fn build_marker(record: &EnrichedRecord, comparison: Comparison) -> Option<MarkerSpec> {
    let (lat, lng) = record.section.coordinates()?;
    let variation = record.variation(comparison.baseline, comparison.compare)?;

    #[allow(clippy::cast_precision_loss)]
    let tone = classify_marker(variation.delta as f64);

    Some(MarkerSpec {
        section_id: record.id().to_string(),
        lat,
        lng,
        tone,
        icon: IconSpec::for_tone(tone),
        popup: variation_popup(&record.name, &variation),
        tooltip: signed_delta(variation.delta),
        tooltip_class: tone.tooltip_class().to_string(),
        delta: variation.delta,
    })
}

/// Builds markers for every eligible record, in input order.
#[must_use]
pub fn build_markers(records: &[EnrichedRecord], comparison: Comparison) -> Vec<MarkerSpec> {
    let markers: Vec<MarkerSpec> = records
        .iter()
        .filter_map(|r| build_marker(r, comparison))
        .collect();
    log::info!("Built {} variation markers", markers.len());
    markers
}

#[cfg(test)]
mod tests {
    use census_map_section_models::{CensusSection, CensusYear, SectionId};

    use super::*;

    const COMPARISON: Comparison = Comparison {
        baseline: CensusYear::Y2011,
        compare: CensusYear::Y2024,
    };

    fn record(coords: Option<(f64, f64)>, before: u32, after: u32) -> EnrichedRecord {
        EnrichedRecord {
            section: CensusSection {
                id: SectionId::from("02-013"),
                geometry: None,
                latitude: coords.map(|c| c.0),
                longitude: coords.map(|c| c.1),
                name: None,
            },
            name: "San Dionisio".to_string(),
            population_by_year: [(CensusYear::Y2011, before), (CensusYear::Y2024, after)]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn positive_marker() {
        let marker = build_marker(&record(Some((36.68, -6.13)), 100, 200), COMPARISON).unwrap();
        assert_eq!(marker.tone, MarkerTone::Positive);
        assert_eq!(marker.tooltip, "+100");
        assert_eq!(marker.tooltip_class, "tooltipPositive");
        assert!(marker.icon.icon_url.ends_with("marker-icon-green.png"));
        assert!(marker.popup.contains("02-013 - San Dionisio"));
        assert!(marker.popup.contains("Población 2011:</strong> 100"));
        assert!(marker.popup.contains("Porcentaje:</strong> +100.00%"));
    }

    #[test]
    fn neutral_and_negative_markers() {
        let neutral = build_marker(&record(Some((1.0, 1.0)), 100, 50), COMPARISON).unwrap();
        assert_eq!(neutral.tone, MarkerTone::Neutral);
        assert_eq!(neutral.tooltip, "-50");

        let negative = build_marker(&record(Some((1.0, 1.0)), 100, 49), COMPARISON).unwrap();
        assert_eq!(negative.tone, MarkerTone::Negative);
        assert_eq!(negative.tooltip_class, "tooltipNegative");
    }

    #[test]
    fn zero_baseline_popup() {
        let marker = build_marker(&record(Some((1.0, 1.0)), 0, 80), COMPARISON).unwrap();
        assert!(marker.popup.contains("Porcentaje:</strong> N/A"));
    }

    #[test]
    fn no_marker_without_coordinates() {
        assert!(build_marker(&record(None, 100, 200), COMPARISON).is_none());
    }

    #[test]
    fn no_marker_without_both_years() {
        let mut partial = record(Some((1.0, 1.0)), 100, 200);
        partial.population_by_year.remove(&CensusYear::Y2024);
        assert!(build_marker(&partial, COMPARISON).is_none());
        assert!(build_markers(&[partial], COMPARISON).is_empty());
    }
}
