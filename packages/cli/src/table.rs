//! Plain-text rendering of the population summary table.

use std::fmt::Write as _;

use census_map_population_models::summary::{PopulationSummary, format_signed, format_thousands};
use census_map_section_models::CensusYear;

/// Renders `summary` as aligned text columns with a totals row.
#[must_use]
pub fn render(summary: &PopulationSummary, current: CensusYear, baseline: CensusYear) -> String {
    let header = [
        "Código sección".to_string(),
        "Nombre".to_string(),
        current.population_column(),
        baseline.population_column(),
        "Diferencia".to_string(),
    ];

    let mut rows: Vec<[String; 5]> = summary
        .rows
        .iter()
        .map(|row| {
            [
                row.section_code.clone(),
                row.name.clone(),
                format_thousands(u64::from(row.current_population)),
                format_thousands(u64::from(row.baseline_population)),
                format_signed(row.difference),
            ]
        })
        .collect();
    rows.push([
        "TOTAL".to_string(),
        String::new(),
        format_thousands(summary.total_current),
        format_thousands(summary.total_baseline),
        format_signed(summary.total_difference),
    ]);

    let mut widths = header.each_ref().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let mut line = String::new();
        for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
            let pad = width - cell.chars().count();
            if i > 0 {
                line.push_str("  ");
            }
            // Text columns left-aligned, numbers right-aligned.
            if i < 2 {
                let _ = write!(line, "{cell}{}", " ".repeat(pad));
            } else {
                let _ = write!(line, "{}{cell}", " ".repeat(pad));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
