//! Overlay toggles for the variation view.
//!
//! The variation view can hide the whole map, the Distrito Centro outline
//! and the intramuros perimeter, and can open an information panel about
//! the real perimeter.

use serde::{Deserialize, Serialize};

/// Number of vertices in a perimeter outline, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum PointsCount {
    /// Vertex count of the outer ring, closing vertex excluded.
    Count(usize),
    /// The geometry had no readable outer ring.
    NotAvailable,
}

impl std::fmt::Display for PointsCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// Contents of the perimeter information panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerimeterInfo {
    /// Perimeter name.
    pub name: String,
    /// How the outline was produced (e.g. `"polygon-union"`).
    pub method: String,
    /// Number of sections inside the perimeter.
    pub section_count: u64,
    /// Identifiers of the sections inside the perimeter.
    pub sections: Vec<String>,
    /// Free-text description.
    pub description: String,
    /// Vertex count of the outline.
    pub points_count: PointsCount,
}

/// Toggle state of the variation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    /// Whether the map itself is rendered.
    pub map_visible: bool,
    /// Whether the Distrito Centro outline is on the map.
    pub district_centre_visible: bool,
    /// Whether the intramuros perimeter is on the map.
    pub intramuros_perimeter_visible: bool,
    /// Open perimeter information panel, if any.
    pub perimeter_info: Option<PerimeterInfo>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            map_visible: true,
            district_centre_visible: true,
            intramuros_perimeter_visible: true,
            perimeter_info: None,
        }
    }
}

impl OverlayState {
    /// Shows or hides the map.
    #[must_use]
    pub fn toggle_map(self) -> Self {
        Self {
            map_visible: !self.map_visible,
            ..self
        }
    }

    /// Shows or hides the Distrito Centro outline.
    #[must_use]
    pub fn toggle_district_centre(self) -> Self {
        Self {
            district_centre_visible: !self.district_centre_visible,
            ..self
        }
    }

    /// Shows or hides the intramuros perimeter.
    #[must_use]
    pub fn toggle_intramuros_perimeter(self) -> Self {
        Self {
            intramuros_perimeter_visible: !self.intramuros_perimeter_visible,
            ..self
        }
    }

    /// Opens the perimeter panel. Without perimeter data the state is left
    /// as it was.
    #[must_use]
    pub fn show_perimeter_info(self, info: Option<PerimeterInfo>) -> Self {
        let Some(info) = info else {
            log::warn!("No perimeter data available to show");
            return self;
        };
        Self {
            perimeter_info: Some(info),
            ..self
        }
    }

    /// Closes the perimeter panel.
    #[must_use]
    pub fn close_perimeter_info(self) -> Self {
        Self {
            perimeter_info: None,
            ..self
        }
    }

    /// Whether the perimeter panel is open.
    #[must_use]
    pub const fn perimeter_info_visible(&self) -> bool {
        self.perimeter_info.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> PerimeterInfo {
        PerimeterInfo {
            name: "Perímetro".to_string(),
            method: "polygon-union".to_string(),
            section_count: 2,
            sections: vec!["01-001".to_string(), "01-002".to_string()],
            description: String::new(),
            points_count: PointsCount::Count(4),
        }
    }

    #[test]
    fn everything_visible_by_default() {
        let state = OverlayState::default();
        assert!(state.map_visible);
        assert!(state.district_centre_visible);
        assert!(state.intramuros_perimeter_visible);
        assert!(!state.perimeter_info_visible());
    }

    #[test]
    fn toggles_are_independent() {
        let state = OverlayState::default().toggle_district_centre();
        assert!(!state.district_centre_visible);
        assert!(state.intramuros_perimeter_visible);
        assert!(state.map_visible);

        let state = state.toggle_intramuros_perimeter().toggle_map();
        assert!(!state.intramuros_perimeter_visible);
        assert!(!state.map_visible);
        assert!(!state.district_centre_visible);
    }

    #[test]
    fn perimeter_panel_open_and_close() {
        let state = OverlayState::default().show_perimeter_info(Some(info()));
        assert!(state.perimeter_info_visible());
        assert_eq!(state.perimeter_info.as_ref().map(|i| i.section_count), Some(2));

        let state = state.close_perimeter_info();
        assert!(!state.perimeter_info_visible());
    }

    #[test]
    fn perimeter_panel_stays_closed_without_data() {
        let state = OverlayState::default().show_perimeter_info(None);
        assert!(!state.perimeter_info_visible());
    }

    #[test]
    fn missing_perimeter_data_keeps_open_panel() {
        let open = OverlayState::default().show_perimeter_info(Some(info()));
        let after = open.clone().show_perimeter_info(None);
        assert_eq!(after, open);
        assert!(after.perimeter_info_visible());
    }

    #[test]
    fn points_count_display() {
        assert_eq!(PointsCount::Count(12).to_string(), "12");
        assert_eq!(PointsCount::NotAvailable.to_string(), "N/A");
    }
}
