//! Per-section population summary table types and number formatting.

use serde::{Deserialize, Serialize};

/// One row of the population summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Raw national section code.
    pub section_code: String,
    /// Section name.
    pub name: String,
    /// Population in the current year.
    pub current_population: u32,
    /// Population in the baseline year, `0` when the section is missing
    /// from the baseline table.
    pub baseline_population: u32,
    /// `current - baseline`.
    pub difference: i64,
}

/// The summary table plus column totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationSummary {
    /// Rows in current-table order.
    pub rows: Vec<SummaryRow>,
    /// Sum of current populations.
    pub total_current: u64,
    /// Sum of baseline populations.
    pub total_baseline: u64,
    /// `total_current - total_baseline`.
    pub total_difference: i64,
}

/// Formats an integer using `.` as the thousands separator.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Formats a signed integer with thousands separators and an explicit
/// sign. Zero is rendered as `"0"`.
#[must_use]
pub fn format_signed(value: i64) -> String {
    let magnitude = format_thousands(value.unsigned_abs());
    match value.signum() {
        1 => format!("+{magnitude}"),
        -1 => format!("-{magnitude}"),
        _ => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
        assert_eq!(format_thousands(212_730), "212.730");
        assert_eq!(format_thousands(1_234_567), "1.234.567");
    }

    #[test]
    fn signed_format() {
        assert_eq!(format_signed(0), "0");
        assert_eq!(format_signed(1500), "+1.500");
        assert_eq!(format_signed(-42), "-42");
        assert_eq!(format_signed(-10_000), "-10.000");
    }
}
