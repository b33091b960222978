//! Population summary table comparing two census years.
//!
//! Unlike the section join, rows are matched on the raw national code, so
//! sections without geometry still show up. A section missing from the
//! baseline table counts as zero baseline population.

use std::collections::BTreeMap;

use census_map_population_models::{
    PopulationTable,
    summary::{PopulationSummary, SummaryRow},
};

use crate::load::TOTAL_CODE;

/// Builds the summary table for `current` against `baseline`.
///
/// The aggregate `TOTAL` row is excluded from both tables; totals are
/// recomputed from the section rows.
#[must_use]
pub fn summarize(current: &PopulationTable, baseline: &PopulationTable) -> PopulationSummary {
    let baseline_by_code: BTreeMap<&str, u32> = baseline
        .records
        .iter()
        .filter(|r| r.section_code != TOTAL_CODE)
        .map(|r| (r.section_code.as_str(), r.population))
        .collect();

    let rows: Vec<SummaryRow> = current
        .records
        .iter()
        .filter(|r| r.section_code != TOTAL_CODE)
        .map(|r| {
            let baseline_population = baseline_by_code
                .get(r.section_code.as_str())
                .copied()
                .unwrap_or(0);
            SummaryRow {
                section_code: r.section_code.clone(),
                name: r.name.clone(),
                current_population: r.population,
                baseline_population,
                difference: i64::from(r.population) - i64::from(baseline_population),
            }
        })
        .collect();

    let total_current: u64 = rows.iter().map(|r| u64::from(r.current_population)).sum();
    let total_baseline: u64 = rows.iter().map(|r| u64::from(r.baseline_population)).sum();

    #[allow(clippy::cast_possible_wrap)]
    let total_difference = total_current as i64 - total_baseline as i64;

    PopulationSummary {
        rows,
        total_current,
        total_baseline,
        total_difference,
    }
}
