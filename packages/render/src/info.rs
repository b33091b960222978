//! Hover information control and tier legend.

use census_map_population_models::{EnrichedRecord, signed_delta};
use census_map_variation_models::{ColorTier, ColorToken, TIERS};
use serde::{Deserialize, Serialize};

use crate::registry::Comparison;

/// Text shown by the info control when nothing is hovered.
pub const INFO_PLACEHOLDER: &str = "Pase el ratón sobre una sección";

/// Text shown for sections without a computable variation.
pub const NO_DATA_LABEL: &str = "Sin datos";

/// The hover information control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoControl {
    /// Heading of the control.
    pub title: String,
    /// Text shown when nothing is hovered.
    pub placeholder: String,
}

impl InfoControl {
    /// Info control for a comparison.
    #[must_use]
    pub fn for_comparison(comparison: Comparison) -> Self {
        Self {
            title: format!(
                "Variación de población {}-{}",
                comparison.baseline, comparison.compare
            ),
            placeholder: INFO_PLACEHOLDER.to_string(),
        }
    }
}

/// Hover text for a record.
#[must_use]
pub fn info_text(record: &EnrichedRecord, comparison: Comparison) -> String {
    let label = if record.name.is_empty() {
        record.id().to_string()
    } else {
        format!("{} - {}", record.id(), record.name)
    };

    match record.variation(comparison.baseline, comparison.compare) {
        Some(variation) => format!(
            "{label}: {} ({})",
            signed_delta(variation.delta),
            variation.percent_delta
        ),
        None => format!("{label}: {NO_DATA_LABEL}"),
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Tier token.
    pub token: ColorToken,
    /// Range label.
    pub label: String,
    /// Swatch color.
    pub color: String,
}

/// Choropleth legend, highest tier first, `NO_DATA` last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend rows.
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Builds the legend from [`TIERS`].
    #[must_use]
    pub fn from_tiers() -> Self {
        let mut entries: Vec<LegendEntry> = TIERS
            .iter()
            .map(|tier| LegendEntry {
                token: tier.token,
                label: tier_label(tier),
                color: tier.token.hex().to_string(),
            })
            .collect();
        entries.push(LegendEntry {
            token: ColorToken::NoData,
            label: NO_DATA_LABEL.to_string(),
            color: ColorToken::NoData.hex().to_string(),
        });
        Self { entries }
    }
}

/// Range label for a tier. Variations are whole numbers, so a half-open
/// range `[lower, upper)` is shown as `lower a upper-1`.
#[must_use]
pub fn tier_label(tier: &ColorTier) -> String {
    if tier.upper.is_infinite() {
        format!("≥ {}", tier.lower)
    } else if tier.lower.is_infinite() {
        format!("< {}", tier.upper)
    } else {
        format!("{} a {}", tier.lower, tier.upper - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use census_map_section_models::{CensusSection, CensusYear, SectionId};

    use super::*;

    const COMPARISON: Comparison = Comparison {
        baseline: CensusYear::Y2004,
        compare: CensusYear::Y2022,
    };

    fn record(name: &str, populations: &[(CensusYear, u32)]) -> EnrichedRecord {
        EnrichedRecord {
            section: CensusSection {
                id: SectionId::from("03-010"),
                geometry: None,
                latitude: None,
                longitude: None,
                name: None,
            },
            name: name.to_string(),
            population_by_year: populations.iter().copied().collect(),
        }
    }

    #[test]
    fn info_text_with_variation() {
        let record = record(
            "Santiago",
            &[(CensusYear::Y2004, 200), (CensusYear::Y2022, 150)],
        );
        assert_eq!(info_text(&record, COMPARISON), "03-010 - Santiago: -50 (-25.00%)");
    }

    #[test]
    fn info_text_without_data() {
        let record = record("", &[(CensusYear::Y2004, 200)]);
        assert_eq!(info_text(&record, COMPARISON), "03-010: Sin datos");
    }

    #[test]
    fn info_control_title() {
        assert_eq!(
            InfoControl::for_comparison(COMPARISON).title,
            "Variación de población 2004-2022"
        );
    }

    #[test]
    fn legend_covers_every_tier_plus_no_data() {
        let legend = Legend::from_tiers();
        assert_eq!(legend.entries.len(), TIERS.len() + 1);
        assert_eq!(legend.entries[0].label, "≥ 1000");
        assert_eq!(legend.entries[7].label, "0 a 9");
        assert_eq!(legend.entries[8].label, "-10 a -1");
        assert_eq!(legend.entries[13].label, "< -200");
        assert_eq!(legend.entries[14].token, ColorToken::NoData);
    }
}
