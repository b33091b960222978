#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Population variation classification.
//!
//! Two classifiers live here and are intentionally kept separate:
//!
//! * [`classify`] buckets a variation into one of 14 [`ColorToken`] tiers
//!   for choropleth shading.
//! * [`classify_marker`] reduces a variation to a three-way [`MarkerTone`]
//!   for point marker badges.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Color tier for a population variation, from strongest growth to
/// strongest decline, plus a sentinel for sections without data.
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
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorToken {
    // ── Growth ──────────────────────────────────────────
    /// +1000 or more
    GrowthExtreme,
    /// +500 to +999
    GrowthVeryHigh,
    /// +200 to +499
    GrowthHigh,
    /// +100 to +199
    GrowthModerate,
    /// +50 to +99
    GrowthLow,
    /// +20 to +49
    GrowthSlight,
    /// +10 to +19
    GrowthMinimal,
    /// 0 to +9
    Stable,

    // ── Decline ─────────────────────────────────────────
    /// -10 to -1
    DeclineMinimal,
    /// -20 to -11
    DeclineSlight,
    /// -50 to -21
    DeclineLow,
    /// -100 to -51
    DeclineModerate,
    /// -200 to -101
    DeclineHigh,
    /// Below -200
    DeclineSevere,

    /// No variation could be computed for the section. Never returned by
    /// [`classify`].
    NoData,
}

impl ColorToken {
    /// Fill color for this tier as a hex string.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::GrowthExtreme => "#00441b",
            Self::GrowthVeryHigh => "#006d2c",
            Self::GrowthHigh => "#238b45",
            Self::GrowthModerate => "#41ab5d",
            Self::GrowthLow => "#74c476",
            Self::GrowthSlight => "#a1d99b",
            Self::GrowthMinimal => "#c7e9c0",
            Self::Stable => "#f7fcf5",
            Self::DeclineMinimal => "#fee0d2",
            Self::DeclineSlight => "#fcbba1",
            Self::DeclineLow => "#fc9272",
            Self::DeclineModerate => "#fb6a4a",
            Self::DeclineHigh => "#de2d26",
            Self::DeclineSevere => "#67000d",
            Self::NoData => "#bdbdbd",
        }
    }

    /// Whether the tier covers only strictly positive variations of at
    /// least 10.
    #[must_use]
    pub const fn is_growth(self) -> bool {
        matches!(
            self,
            Self::GrowthExtreme
                | Self::GrowthVeryHigh
                | Self::GrowthHigh
                | Self::GrowthModerate
                | Self::GrowthLow
                | Self::GrowthSlight
                | Self::GrowthMinimal
        )
    }

    /// Whether the tier covers only negative variations.
    #[must_use]
    pub const fn is_decline(self) -> bool {
        matches!(
            self,
            Self::DeclineMinimal
                | Self::DeclineSlight
                | Self::DeclineLow
                | Self::DeclineModerate
                | Self::DeclineHigh
                | Self::DeclineSevere
        )
    }
}

/// A half-open variation range `[lower, upper)` and its color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTier {
    /// Inclusive lower bound.
    pub lower: f64,
    /// Exclusive upper bound.
    pub upper: f64,
    /// Color assigned to the range.
    pub token: ColorToken,
}

impl ColorTier {
    const fn new(lower: f64, upper: f64, token: ColorToken) -> Self {
        Self {
            lower,
            upper,
            token,
        }
    }

    /// Whether `delta` falls in this tier.
    #[must_use]
    pub fn contains(&self, delta: f64) -> bool {
        delta >= self.lower && delta < self.upper
    }
}

/// Choropleth tiers ordered from highest to lowest. Together they cover
/// every real number exactly once.
pub const TIERS: [ColorTier; 14] = [
    ColorTier::new(1000.0, f64::INFINITY, ColorToken::GrowthExtreme),
    ColorTier::new(500.0, 1000.0, ColorToken::GrowthVeryHigh),
    ColorTier::new(200.0, 500.0, ColorToken::GrowthHigh),
    ColorTier::new(100.0, 200.0, ColorToken::GrowthModerate),
    ColorTier::new(50.0, 100.0, ColorToken::GrowthLow),
    ColorTier::new(20.0, 50.0, ColorToken::GrowthSlight),
    ColorTier::new(10.0, 20.0, ColorToken::GrowthMinimal),
    ColorTier::new(0.0, 10.0, ColorToken::Stable),
    ColorTier::new(-10.0, 0.0, ColorToken::DeclineMinimal),
    ColorTier::new(-20.0, -10.0, ColorToken::DeclineSlight),
    ColorTier::new(-50.0, -20.0, ColorToken::DeclineLow),
    ColorTier::new(-100.0, -50.0, ColorToken::DeclineModerate),
    ColorTier::new(-200.0, -100.0, ColorToken::DeclineHigh),
    ColorTier::new(f64::NEG_INFINITY, -200.0, ColorToken::DeclineSevere),
];

/// Buckets a variation into a choropleth tier. First match from the top
/// wins; `NaN` lands in the lowest tier.
#[must_use]
pub fn classify(delta: f64) -> ColorToken {
    TIERS
        .iter()
        .find(|tier| delta >= tier.lower)
        .map_or(ColorToken::DeclineSevere, |tier| tier.token)
}

/// Like [`classify`], but maps a missing variation to
/// [`ColorToken::NoData`].
#[must_use]
pub fn classify_optional(delta: Option<f64>) -> ColorToken {
    delta.map_or(ColorToken::NoData, classify)
}

/// Threshold beyond which a marker is no longer neutral.
pub const MARKER_THRESHOLD: f64 = 50.0;

/// Three-way tone for point markers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MarkerTone {
    /// Variation above +50.
    Positive,
    /// Variation below -50.
    Negative,
    /// Everything in between, inclusive.
    Neutral,
}

const MARKER_ICON_BASE: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img";

/// Shadow image shared by every marker icon.
pub const MARKER_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/0.7.7/images/marker-shadow.png";

impl MarkerTone {
    /// Marker icon color name.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Positive => "green",
            Self::Negative => "red",
            Self::Neutral => "yellow",
        }
    }

    /// Marker icon image URL.
    #[must_use]
    pub fn icon_url(self) -> String {
        format!("{MARKER_ICON_BASE}/marker-icon-{}.png", self.color())
    }

    /// CSS class applied to the marker's permanent tooltip.
    #[must_use]
    pub const fn tooltip_class(self) -> &'static str {
        match self {
            Self::Positive => "tooltipPositive",
            Self::Negative => "tooltipNegative",
            Self::Neutral => "tooltipNeutral",
        }
    }
}

/// Reduces a variation to a marker tone: `> 50` positive, `< -50`
/// negative, anything else neutral.
#[must_use]
pub fn classify_marker(delta: f64) -> MarkerTone {
    if delta > MARKER_THRESHOLD {
        MarkerTone::Positive
    } else if delta < -MARKER_THRESHOLD {
        MarkerTone::Negative
    } else {
        MarkerTone::Neutral
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn boundaries_are_inclusive_lower() {
        let cases = [
            (1000.0, ColorToken::GrowthExtreme),
            (999.0, ColorToken::GrowthVeryHigh),
            (500.0, ColorToken::GrowthVeryHigh),
            (200.0, ColorToken::GrowthHigh),
            (100.0, ColorToken::GrowthModerate),
            (50.0, ColorToken::GrowthLow),
            (20.0, ColorToken::GrowthSlight),
            (10.0, ColorToken::GrowthMinimal),
            (0.0, ColorToken::Stable),
            (-1.0, ColorToken::DeclineMinimal),
            (-10.0, ColorToken::DeclineMinimal),
            (-11.0, ColorToken::DeclineSlight),
            (-20.0, ColorToken::DeclineSlight),
            (-50.0, ColorToken::DeclineLow),
            (-100.0, ColorToken::DeclineModerate),
            (-200.0, ColorToken::DeclineHigh),
            (-201.0, ColorToken::DeclineSevere),
        ];
        for (delta, expected) in cases {
            assert_eq!(classify(delta), expected, "wrong tier for {delta}");
        }
    }

    #[test]
    fn every_integer_matches_exactly_one_tier() {
        for delta in -1000..=1000 {
            let delta = f64::from(delta);
            let matching: Vec<_> = TIERS.iter().filter(|t| t.contains(delta)).collect();
            assert_eq!(matching.len(), 1, "{delta} matched {} tiers", matching.len());
            assert_eq!(matching[0].token, classify(delta), "disagreement at {delta}");
        }
    }

    #[test]
    fn tiers_are_contiguous() {
        assert!(TIERS[0].upper.is_infinite() && TIERS[0].upper > 0.0);
        assert!(TIERS[TIERS.len() - 1].lower.is_infinite() && TIERS[TIERS.len() - 1].lower < 0.0);
        for pair in TIERS.windows(2) {
            assert!(
                (pair[0].lower - pair[1].upper).abs() < f64::EPSILON,
                "gap between {} and {}",
                pair[0].token,
                pair[1].token
            );
        }
    }

    #[test]
    fn extremes_and_fractions() {
        assert_eq!(classify(f64::INFINITY), ColorToken::GrowthExtreme);
        assert_eq!(classify(f64::NEG_INFINITY), ColorToken::DeclineSevere);
        assert_eq!(classify(f64::NAN), ColorToken::DeclineSevere);
        assert_eq!(classify(9.999), ColorToken::Stable);
        assert_eq!(classify(-0.5), ColorToken::DeclineMinimal);
    }

    #[test]
    fn classify_never_returns_no_data() {
        for delta in -5000..=5000 {
            assert_ne!(classify(f64::from(delta)), ColorToken::NoData);
        }
        assert_eq!(classify_optional(None), ColorToken::NoData);
        assert_eq!(classify_optional(Some(75.0)), ColorToken::GrowthLow);
    }

    #[test]
    fn marker_tones() {
        assert_eq!(classify_marker(51.0), MarkerTone::Positive);
        assert_eq!(classify_marker(50.0), MarkerTone::Neutral);
        assert_eq!(classify_marker(0.0), MarkerTone::Neutral);
        assert_eq!(classify_marker(-50.0), MarkerTone::Neutral);
        assert_eq!(classify_marker(-51.0), MarkerTone::Negative);
    }

    #[test]
    fn classifiers_agree_on_sign_at_boundaries() {
        for delta in [-51.0, -50.0, -49.0, 49.0, 50.0, 51.0] {
            let tier = classify(delta);
            match classify_marker(delta) {
                MarkerTone::Positive => assert!(tier.is_growth(), "{delta}: {tier}"),
                MarkerTone::Negative => assert!(tier.is_decline(), "{delta}: {tier}"),
                MarkerTone::Neutral => {}
            }
        }
        // 50 is the top of neutral and the bottom of the +50 tier.
        assert_eq!(classify_marker(50.0), MarkerTone::Neutral);
        assert_eq!(classify(50.0), ColorToken::GrowthLow);
        assert!(classify(50.0).is_growth());
        assert_eq!(classify_marker(-50.0), MarkerTone::Neutral);
        assert!(classify(-50.0).is_decline());
    }

    #[test]
    fn marker_tone_never_contradicts_tier_sign() {
        for delta in -1000..=1000 {
            let delta = f64::from(delta);
            let tier = classify(delta);
            match classify_marker(delta) {
                MarkerTone::Positive => assert!(!tier.is_decline(), "{delta}"),
                MarkerTone::Negative => assert!(!tier.is_growth(), "{delta}"),
                MarkerTone::Neutral => {}
            }
        }
    }

    #[test]
    fn token_string_forms() {
        assert_eq!(ColorToken::NoData.to_string(), "NO_DATA");
        assert_eq!(
            ColorToken::from_str("GROWTH_EXTREME").ok(),
            Some(ColorToken::GrowthExtreme)
        );
        assert_eq!(MarkerTone::Positive.as_ref(), "positive");
    }

    #[test]
    fn marker_assets() {
        assert!(MarkerTone::Negative.icon_url().ends_with("marker-icon-red.png"));
        assert_eq!(MarkerTone::Neutral.tooltip_class(), "tooltipNeutral");
    }

    #[test]
    fn all_tokens_have_distinct_colors() {
        let mut colors: Vec<&str> = TIERS.iter().map(|t| t.token.hex()).collect();
        colors.push(ColorToken::NoData.hex());
        let count = colors.len();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), count);
    }
}
