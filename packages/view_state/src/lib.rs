#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View state for the census map viewer.
//!
//! [`ViewState`] tracks which map variant is on screen and whether the
//! summary table is shown. It is a plain `Copy` value: every operation
//! returns the next state instead of mutating shared globals, so callers
//! own the state and tests need no UI harness. [`ViewStore`] wraps a state
//! for callers that want a single mutable handle.

pub mod overlay;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// The map variants the viewer can show.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MapVariant {
    /// Municipality-wide choropleth of 2004 → 2022 variation.
    Population,
    /// Historic centre markers of 2011 → 2024 variation.
    #[default]
    Variation,
    /// Bare census section outlines.
    Basic,
    /// District boundaries.
    Distritos,
}

impl MapVariant {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Population, Self::Variation, Self::Basic, Self::Distritos]
    }
}

/// Error returned when parsing an unrecognised map variant name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown map variant '{value}': expected one of population, variation, basic, distritos")]
pub struct UnknownVariantError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for MapVariant {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_ref() == s)
            .ok_or_else(|| UnknownVariantError {
                value: s.to_string(),
            })
    }
}

/// Active map variant and summary table visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    active_map_variant: MapVariant,
    table_visible: bool,
}

impl ViewState {
    /// Creates a state showing `variant` with the table hidden.
    #[must_use]
    pub const fn new(variant: MapVariant) -> Self {
        Self {
            active_map_variant: variant,
            table_visible: false,
        }
    }

    /// The map variant on screen.
    #[must_use]
    pub const fn active_map_variant(self) -> MapVariant {
        self.active_map_variant
    }

    /// Whether the summary table is shown.
    #[must_use]
    pub const fn table_visible(self) -> bool {
        self.table_visible
    }

    /// Switches to `variant`. Always hides the table, even when `variant`
    /// is already active.
    #[must_use]
    pub const fn set_map_variant(self, variant: MapVariant) -> Self {
        Self::new(variant)
    }

    /// Shows the summary table, keeping the variant.
    #[must_use]
    pub const fn show_table(self) -> Self {
        Self {
            table_visible: true,
            ..self
        }
    }

    /// Hides the summary table, keeping the variant.
    #[must_use]
    pub const fn hide_table(self) -> Self {
        Self {
            table_visible: false,
            ..self
        }
    }

    /// Flips table visibility, keeping the variant.
    #[must_use]
    pub const fn toggle_table(self) -> Self {
        Self {
            table_visible: !self.table_visible,
            ..self
        }
    }

    /// Whether `variant` is the active one.
    #[must_use]
    pub fn is_variant(self, variant: MapVariant) -> bool {
        self.active_map_variant == variant
    }
}

/// Owner of a [`ViewState`] that applies transitions in place.
#[derive(Debug, Default)]
pub struct ViewStore {
    state: ViewState,
}

impl ViewStore {
    /// Creates a store holding `state`.
    #[must_use]
    pub const fn new(state: ViewState) -> Self {
        Self { state }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    /// Applies a transition and returns the resulting state.
    pub fn apply(&mut self, transition: impl FnOnce(ViewState) -> ViewState) -> ViewState {
        let next = transition(self.state);
        if next != self.state {
            log::debug!("View state {:?} -> {next:?}", self.state);
        }
        self.state = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state() {
        let state = ViewState::default();
        assert_eq!(state.active_map_variant(), MapVariant::Variation);
        assert!(!state.table_visible());
    }

    #[test]
    fn variant_change_resets_table() {
        let state = ViewState::new(MapVariant::Variation);

        let state = state.set_map_variant(MapVariant::Basic);
        assert_eq!(state.active_map_variant(), MapVariant::Basic);
        assert!(!state.table_visible());

        let state = state.show_table();
        assert_eq!(state.active_map_variant(), MapVariant::Basic);
        assert!(state.table_visible());

        let state = state.set_map_variant(MapVariant::Population);
        assert_eq!(state.active_map_variant(), MapVariant::Population);
        assert!(!state.table_visible());
    }

    #[test]
    fn reselecting_same_variant_hides_table() {
        let state = ViewState::new(MapVariant::Basic).show_table();
        let state = state.set_map_variant(MapVariant::Basic);
        assert!(!state.table_visible());
    }

    #[test]
    fn table_operations_keep_variant() {
        let state = ViewState::new(MapVariant::Distritos);
        assert!(state.toggle_table().table_visible());
        assert!(!state.toggle_table().toggle_table().table_visible());
        assert!(!state.show_table().hide_table().table_visible());
        assert!(state.show_table().toggle_table().is_variant(MapVariant::Distritos));
    }

    #[test]
    fn is_variant_predicate() {
        let state = ViewState::new(MapVariant::Population);
        assert!(state.is_variant(MapVariant::Population));
        for other in [MapVariant::Variation, MapVariant::Basic, MapVariant::Distritos] {
            assert!(!state.is_variant(other));
        }
    }

    #[test]
    fn parses_variant_names() {
        for variant in MapVariant::all() {
            assert_eq!(variant.as_ref().parse::<MapVariant>(), Ok(*variant));
        }
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = "satellite".parse::<MapVariant>().unwrap_err();
        assert_eq!(err.value, "satellite");
        assert!("Population".parse::<MapVariant>().is_err());
    }

    #[test]
    fn store_applies_transitions() {
        let mut store = ViewStore::default();
        store.apply(ViewState::show_table);
        assert!(store.state().table_visible());
        let next = store.apply(|s| s.set_map_variant(MapVariant::Basic));
        assert_eq!(next, store.state());
        assert_eq!(next, ViewState::new(MapVariant::Basic));
    }
}
