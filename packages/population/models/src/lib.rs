#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Population record, enriched section and variation result types.
//!
//! Population tables are independent per census year and may have
//! incomplete coverage. After joining, each census section becomes an
//! [`EnrichedRecord`] from which variations between any two years are
//! computed on demand.

pub mod summary;

use std::collections::BTreeMap;

use census_map_section_models::{CensusSection, CensusYear, SectionId};
use serde::{Deserialize, Serialize};

/// A single population figure from one census table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationRecord {
    /// Raw national section code as it appears in the table.
    pub section_code: String,
    /// Census year of the table this record came from.
    pub year: CensusYear,
    /// Resident population.
    pub population: u32,
    /// Section name.
    pub name: String,
}

/// All records of a single census year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationTable {
    /// Census year shared by every record.
    pub year: CensusYear,
    /// Records in source order.
    pub records: Vec<PopulationRecord>,
}

/// How sections missing from one or more tables are handled by the join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// Keep only sections matched in every table and carrying usable
    /// coordinates.
    #[default]
    Strict,
    /// Keep every section; missing years are left out of
    /// [`EnrichedRecord::population_by_year`].
    KeepMissing,
}

/// Percentage change between two populations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum PercentDelta {
    /// Percentage rounded to two decimals.
    Computed(f64),
    /// The baseline population is zero.
    NotComputable,
}

impl PercentDelta {
    /// Computes `delta / baseline * 100` rounded half-up to two decimals.
    ///
    /// The rounding is done on the exact rational so `x.xx5` ties are
    /// never lost to binary floating point. Ties round away from zero.
    #[must_use]
    pub fn compute(baseline: u32, compare: u32) -> Self {
        if baseline == 0 {
            return Self::NotComputable;
        }

        let numerator = (i128::from(compare) - i128::from(baseline)) * 10_000;
        let denominator = i128::from(baseline);
        let mut hundredths = numerator / denominator;
        let remainder = numerator % denominator;
        if remainder.abs() * 2 >= denominator {
            hundredths += numerator.signum();
        }

        #[allow(clippy::cast_precision_loss)]
        let value = hundredths as f64 / 100.0;
        Self::Computed(value)
    }

    /// Returns the percentage, if computable.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Computed(value) => Some(value),
            Self::NotComputable => None,
        }
    }
}

impl std::fmt::Display for PercentDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Computed(value) if *value > 0.0 => write!(f, "+{value:.2}%"),
            Self::Computed(value) => write!(f, "{value:.2}%"),
            Self::NotComputable => f.write_str("N/A"),
        }
    }
}

/// Variation between two census years for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationResult {
    /// Section identifier.
    pub section_id: SectionId,
    /// Earlier year.
    pub baseline_year: CensusYear,
    /// Later year.
    pub compare_year: CensusYear,
    /// Population in the baseline year.
    pub baseline_population: u32,
    /// Population in the compare year.
    pub compare_population: u32,
    /// `compare - baseline`.
    pub delta: i64,
    /// Percentage change relative to the baseline.
    pub percent_delta: PercentDelta,
}

impl VariationResult {
    /// Builds a variation from two population figures.
    #[must_use]
    pub fn new(
        section_id: SectionId,
        baseline_year: CensusYear,
        compare_year: CensusYear,
        baseline_population: u32,
        compare_population: u32,
    ) -> Self {
        Self {
            section_id,
            baseline_year,
            compare_year,
            baseline_population,
            compare_population,
            delta: i64::from(compare_population) - i64::from(baseline_population),
            percent_delta: PercentDelta::compute(baseline_population, compare_population),
        }
    }
}

/// Formats a delta with an explicit `+` for positive values.
#[must_use]
pub fn signed_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

/// A census section joined with its population figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    /// Geometry-side section, unchanged.
    pub section: CensusSection,
    /// Section name taken from the population tables.
    pub name: String,
    /// Population per matched census year.
    pub population_by_year: BTreeMap<CensusYear, u32>,
}

impl EnrichedRecord {
    /// Section identifier.
    #[must_use]
    pub const fn id(&self) -> &SectionId {
        &self.section.id
    }

    /// Population for `year`, if the section was matched in that table.
    #[must_use]
    pub fn population(&self, year: CensusYear) -> Option<u32> {
        self.population_by_year.get(&year).copied()
    }

    /// `compare - baseline`, if both years are present.
    #[must_use]
    pub fn delta(&self, baseline: CensusYear, compare: CensusYear) -> Option<i64> {
        let before = self.population(baseline)?;
        let after = self.population(compare)?;
        Some(i64::from(after) - i64::from(before))
    }

    /// Percentage change between two years, if both years are present.
    #[must_use]
    pub fn percent_delta(&self, baseline: CensusYear, compare: CensusYear) -> Option<PercentDelta> {
        let before = self.population(baseline)?;
        let after = self.population(compare)?;
        Some(PercentDelta::compute(before, after))
    }

    /// Full variation between two years, if both years are present.
    #[must_use]
    pub fn variation(&self, baseline: CensusYear, compare: CensusYear) -> Option<VariationResult> {
        Some(VariationResult::new(
            self.section.id.clone(),
            baseline,
            compare,
            self.population(baseline)?,
            self.population(compare)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(populations: &[(CensusYear, u32)]) -> EnrichedRecord {
        EnrichedRecord {
            section: CensusSection {
                id: SectionId::from("01-001"),
                geometry: None,
                latitude: Some(36.68),
                longitude: Some(-6.13),
                name: None,
            },
            name: "Centro".to_string(),
            population_by_year: populations.iter().copied().collect(),
        }
    }

    #[test]
    fn percent_for_simple_growth() {
        assert_eq!(PercentDelta::compute(100, 150), PercentDelta::Computed(50.0));
    }

    #[test]
    fn percent_not_computable_for_zero_baseline() {
        let percent = PercentDelta::compute(0, 50);
        assert_eq!(percent, PercentDelta::NotComputable);
        assert_eq!(percent.value(), None);
    }

    #[test]
    fn percent_zero_is_not_not_computable() {
        assert_eq!(PercentDelta::compute(80, 80), PercentDelta::Computed(0.0));
    }

    #[test]
    fn percent_rounds_half_up() {
        // 1/800 = 0.125% exactly; 1/3 = 33.333..%
        assert_eq!(PercentDelta::compute(800, 801), PercentDelta::Computed(0.13));
        assert_eq!(PercentDelta::compute(3, 4), PercentDelta::Computed(33.33));
        assert_eq!(PercentDelta::compute(3, 5), PercentDelta::Computed(66.67));
    }

    #[test]
    fn percent_rounds_negative_ties_away_from_zero() {
        assert_eq!(PercentDelta::compute(800, 799), PercentDelta::Computed(-0.13));
        assert_eq!(PercentDelta::compute(200, 100), PercentDelta::Computed(-50.0));
    }

    #[test]
    fn percent_display() {
        assert_eq!(PercentDelta::Computed(12.5).to_string(), "+12.50%");
        assert_eq!(PercentDelta::Computed(-3.0).to_string(), "-3.00%");
        assert_eq!(PercentDelta::Computed(0.0).to_string(), "0.00%");
        assert_eq!(PercentDelta::NotComputable.to_string(), "N/A");
    }

    #[test]
    fn signed_delta_format() {
        assert_eq!(signed_delta(12), "+12");
        assert_eq!(signed_delta(0), "0");
        assert_eq!(signed_delta(-7), "-7");
    }

    #[test]
    fn variation_between_years() {
        let record = record(&[(CensusYear::Y2011, 100), (CensusYear::Y2024, 150)]);
        let variation = record
            .variation(CensusYear::Y2011, CensusYear::Y2024)
            .unwrap();
        assert_eq!(variation.delta, 50);
        assert_eq!(variation.percent_delta, PercentDelta::Computed(50.0));
        assert_eq!(variation.section_id.as_str(), "01-001");
    }

    #[test]
    fn delta_needs_both_years() {
        let record = record(&[(CensusYear::Y2004, 100)]);
        assert_eq!(record.delta(CensusYear::Y2004, CensusYear::Y2022), None);
        assert_eq!(record.percent_delta(CensusYear::Y2004, CensusYear::Y2022), None);
        assert!(record.variation(CensusYear::Y2004, CensusYear::Y2022).is_none());
    }

    #[test]
    fn supports_multiple_year_pairs() {
        let record = record(&[
            (CensusYear::Y2004, 1000),
            (CensusYear::Y2011, 900),
            (CensusYear::Y2022, 1100),
            (CensusYear::Y2024, 800),
        ]);
        assert_eq!(record.delta(CensusYear::Y2004, CensusYear::Y2022), Some(100));
        assert_eq!(record.delta(CensusYear::Y2011, CensusYear::Y2024), Some(-100));
    }

    #[test]
    fn percent_delta_serializes_tagged() {
        let json = serde_json::to_value(PercentDelta::NotComputable).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "notComputable" }));
    }
}
