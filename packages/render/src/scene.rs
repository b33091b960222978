//! Builds the complete, library-independent description of a map view.

use std::collections::BTreeMap;

use census_map_population::join::join_by_identifier;
use census_map_population_models::{EnrichedRecord, PopulationTable};
use census_map_section_models::{CensusSection, SectionId};
use census_map_view_state::{
    MapVariant,
    overlay::{OverlayState, PerimeterInfo},
};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::Serialize;
use serde_json::Value;

use crate::{
    RenderError,
    info::{InfoControl, Legend, info_text},
    marker::{MarkerSpec, build_markers, variation_popup},
    perimeter::{
        LatLng, Overlay, Perimeter, district_centre_overlay, intramuros_overlay,
        real_perimeter_overlay,
    },
    registry::{MapOptions, ViewDefinition},
    style::{HoverStyles, StyleFn, default_style_fn, hover_styles, record_token},
};

/// Base tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerConfig {
    /// URL template.
    pub url: String,
    /// Attribution HTML.
    pub attribution: String,
    /// Tile set id.
    pub id: String,
    /// Maximum tile zoom.
    pub max_zoom: u8,
    /// Minimum tile zoom.
    pub min_zoom: u8,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url: "http://{s}.tile.osm.org/{z}/{x}/{y}.png".to_string(),
            attribution: "Map data &copy; <a href=\"http://openstreetmap.org\">OpenStreetMap</a> \
                          contributors, <a href=\"http://creativecommons.org/licenses/by-sa/2.0/\">CC-BY-SA</a>, \
                          Imagery © <a href=\"http://mapbox.com\">Mapbox</a>"
                .to_string(),
            id: "mapbox.light".to_string(),
            max_zoom: 17,
            min_zoom: 10,
        }
    }
}

/// Everything a map widget needs to draw one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapScene {
    /// Variant drawn.
    pub variant: MapVariant,
    /// DOM id of the element the map is mounted into.
    pub container: String,
    /// Navigation label.
    pub title: String,
    /// Whether the map is shown at all.
    pub visible: bool,
    /// Initial map options.
    pub options: MapOptions,
    /// Base tile layer.
    pub tile_layer: TileLayerConfig,
    /// Section polygons; each feature carries `ID`, `style` and `popup`
    /// properties, plus `token` and `info` on comparison views.
    pub sections: FeatureCollection,
    /// Hover highlight/reset styles for the section layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<HoverStyles>,
    /// Boundary overlays, bottom to top.
    pub overlays: Vec<Overlay>,
    /// Variation markers.
    pub markers: Vec<MarkerSpec>,
    /// Tier legend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    /// Hover information control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_control: Option<InfoControl>,
    /// Open perimeter information panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perimeter_info: Option<PerimeterInfo>,
}

impl MapScene {
    /// Serializes the scene as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loaded input data for scene building.
#[derive(Debug, Clone, Default)]
pub struct SceneData {
    /// Census section geometry.
    pub sections: Vec<CensusSection>,
    /// Population tables, one per census year.
    pub tables: Vec<PopulationTable>,
    /// Hand-traced Distrito Centro outline.
    pub district_centre: Vec<LatLng>,
    /// Real perimeter of the selected sections.
    pub real_perimeter: Option<Perimeter>,
    /// Intramuros perimeter.
    pub intramuros_perimeter: Option<Perimeter>,
}

/// Builds a [`MapScene`] from a view definition and loaded data.
pub struct SceneBuilder<'a> {
    view: &'a ViewDefinition,
    style: StyleFn<'a>,
}

impl<'a> SceneBuilder<'a> {
    /// Creates a builder using the view's default style function.
    #[must_use]
    pub fn new(view: &'a ViewDefinition) -> Self {
        Self {
            view,
            style: default_style_fn(view.section_style, view.comparison),
        }
    }

    /// Replaces the section style function.
    #[must_use]
    pub fn with_style(mut self, style: StyleFn<'a>) -> Self {
        self.style = style;
        self
    }

    /// Joins the data and assembles the scene.
    #[must_use]
    pub fn build(&self, data: &SceneData, overlays: &OverlayState) -> MapScene {
        let view = self.view;
        let comparison = view.comparison;

        let records = comparison.map_or_else(Vec::new, |comparison| {
            let tables: Vec<PopulationTable> = data
                .tables
                .iter()
                .filter(|t| t.year == comparison.baseline || t.year == comparison.compare)
                .cloned()
                .collect();
            join_by_identifier(&data.sections, &tables, view.join_policy)
        });
        let by_id: BTreeMap<&SectionId, &EnrichedRecord> =
            records.iter().map(|r| (r.id(), r)).collect();

        let features = data
            .sections
            .iter()
            .map(|section| {
                let record = by_id.get(&section.id).map_or_else(
                    || unjoined(section),
                    |record| (*record).clone(),
                );
                self.section_feature(&record)
            })
            .collect();

        let markers = match comparison {
            Some(comparison) if view.layers.markers => build_markers(&records, comparison),
            _ => vec![],
        };

        log::info!(
            "Built {} scene: {} sections, {} joined, {} markers",
            view.variant,
            data.sections.len(),
            records.len(),
            markers.len()
        );

        MapScene {
            variant: view.variant,
            container: view.container.clone(),
            title: view.title.clone(),
            visible: overlays.map_visible,
            options: view.map,
            tile_layer: TileLayerConfig::default(),
            sections: FeatureCollection {
                bbox: None,
                features,
                foreign_members: None,
            },
            hover: hover_styles(view.section_style),
            overlays: self.overlays(data, overlays),
            markers,
            legend: view.layers.legend.then(Legend::from_tiers),
            info_control: comparison
                .filter(|_| view.layers.info_control)
                .map(InfoControl::for_comparison),
            perimeter_info: overlays.perimeter_info.clone(),
        }
    }

    fn section_feature(&self, record: &EnrichedRecord) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("ID".to_string(), Value::from(record.id().as_str()));
        if !record.name.is_empty() {
            properties.insert("name".to_string(), Value::from(record.name.as_str()));
        }
        properties.insert(
            "style".to_string(),
            serde_json::to_value((self.style)(record))
                .expect("path styles always serialize to JSON"),
        );

        let variation = self
            .view
            .comparison
            .and_then(|c| record.variation(c.baseline, c.compare));
        let popup = variation.as_ref().map_or_else(
            || section_popup(record.id()),
            |variation| variation_popup(&record.name, variation),
        );
        properties.insert("popup".to_string(), Value::from(popup));

        if let Some(comparison) = self.view.comparison {
            properties.insert(
                "token".to_string(),
                Value::from(record_token(record, comparison).as_ref()),
            );
            if self.view.layers.info_control {
                properties.insert(
                    "info".to_string(),
                    Value::from(info_text(record, comparison)),
                );
            }
        }

        Feature {
            bbox: None,
            geometry: record.section.geometry.clone(),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    fn overlays(&self, data: &SceneData, state: &OverlayState) -> Vec<Overlay> {
        let layers = self.view.layers;
        let mut overlays = vec![];

        if layers.district_centre {
            overlays.extend(district_centre_overlay(
                &data.district_centre,
                self.view.variant,
                state.district_centre_visible,
            ));
        }

        if layers.real_perimeter {
            match &data.real_perimeter {
                Some(perimeter) => overlays.push(real_perimeter_overlay(perimeter)),
                None => log::warn!("No real perimeter data available"),
            }
        }

        if layers.intramuros_perimeter {
            match &data.intramuros_perimeter {
                Some(perimeter) => overlays.push(intramuros_overlay(
                    perimeter,
                    state.intramuros_perimeter_visible,
                )),
                None => log::warn!("No intramuros perimeter data available"),
            }
        }

        overlays
    }
}

/// Popup for a section without population data.
#[must_use]
pub fn section_popup(id: &SectionId) -> String {
    format!(
        "<div class=\"section-popup\"><h4>Sección Censal: {id}</h4>\
         <p><strong>Distrito:</strong> {}</p>\
         <p><strong>Sección:</strong> {}</p></div>",
        id.district(),
        id.section()
    )
}

fn unjoined(section: &CensusSection) -> EnrichedRecord {
    EnrichedRecord {
        section: section.clone(),
        name: section.name.clone().unwrap_or_default(),
        population_by_year: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use census_map_population_models::PopulationRecord;
    use census_map_section_models::CensusYear;
    use census_map_variation_models::ColorToken;
    use geojson::Geometry;

    use super::*;
    use crate::{perimeter::parse_perimeter, registry::view};

    fn section(id: &str, coords: Option<(f64, f64)>) -> CensusSection {
        CensusSection {
            id: SectionId::from(id),
            geometry: Some(Geometry::new(geojson::Value::Point(vec![-6.13, 36.68]))),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            name: None,
        }
    }

    fn table(year: CensusYear, rows: &[(&str, u32)]) -> PopulationTable {
        PopulationTable {
            year,
            records: rows
                .iter()
                .map(|(code, population)| PopulationRecord {
                    section_code: (*code).to_string(),
                    year,
                    population: *population,
                    name: "Centro".to_string(),
                })
                .collect(),
        }
    }

    fn data() -> SceneData {
        SceneData {
            sections: vec![
                section("01-001", Some((36.68, -6.13))),
                section("01-002", Some((36.69, -6.14))),
            ],
            tables: vec![
                table(CensusYear::Y2004, &[("1102001001", 100)]),
                table(CensusYear::Y2011, &[("1102001001", 100), ("1102001002", 300)]),
                table(CensusYear::Y2022, &[("1102001001", 250)]),
                table(CensusYear::Y2024, &[("1102001001", 200), ("1102001002", 200)]),
            ],
            district_centre: vec![
                LatLng { lat: 36.68, lng: -6.13 },
                LatLng { lat: 36.69, lng: -6.13 },
                LatLng { lat: 36.69, lng: -6.14 },
            ],
            real_perimeter: Some(
                parse_perimeter(r#"{ "type": "FeatureCollection", "features": [] }"#).unwrap(),
            ),
            intramuros_perimeter: None,
        }
    }

    fn property<'f>(feature: &'f Feature, key: &str) -> &'f Value {
        feature.property(key).unwrap()
    }

    #[test]
    fn population_scene_keeps_unmatched_sections_as_no_data() {
        let view = view(MapVariant::Population).unwrap();
        let scene = SceneBuilder::new(&view).build(&data(), &OverlayState::default());

        assert_eq!(scene.sections.features.len(), 2);
        let matched = &scene.sections.features[0];
        assert_eq!(property(matched, "ID"), "01-001");
        assert_eq!(
            property(matched, "token"),
            ColorToken::GrowthModerate.as_ref()
        );
        let missing = &scene.sections.features[1];
        assert_eq!(property(missing, "token"), ColorToken::NoData.as_ref());
        assert!(property(missing, "popup").as_str().unwrap().contains("Sección Censal: 01-002"));
        assert!(scene.legend.is_some());
        assert!(scene.info_control.is_some());
        assert!(scene.markers.is_empty());
    }

    #[test]
    fn variation_scene_builds_markers_and_overlays() {
        let view = view(MapVariant::Variation).unwrap();
        let scene = SceneBuilder::new(&view).build(&data(), &OverlayState::default());

        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.markers[0].tooltip, "+100");
        assert_eq!(scene.markers[1].tooltip, "-100");
        assert_eq!(scene.overlays.len(), 2, "intramuros data is missing");
        assert!(scene.legend.is_none());
        assert!(!scene.options.zoom_control);
    }

    #[test]
    fn overlay_toggles_flow_into_scene() {
        let view = view(MapVariant::Variation).unwrap();
        let state = OverlayState::default().toggle_district_centre().toggle_map();
        let scene = SceneBuilder::new(&view).build(&data(), &state);
        assert!(!scene.visible);
        assert!(!scene.overlays[0].visible);
    }

    #[test]
    fn basic_scene_has_plain_popups() {
        let view = view(MapVariant::Basic).unwrap();
        let scene = SceneBuilder::new(&view).build(&data(), &OverlayState::default());
        let feature = &scene.sections.features[0];
        let popup = property(feature, "popup").as_str().unwrap();
        assert!(popup.contains("Distrito:</strong> 01"));
        assert!(popup.contains("Sección:</strong> 001"));
        assert!(feature.property("token").is_none());
        assert!(scene.overlays.is_empty());
    }

    #[test]
    fn injected_style_is_used() {
        let view = view(MapVariant::Basic).unwrap();
        let scene = SceneBuilder::new(&view)
            .with_style(Box::new(|_| crate::style::PathStyle {
                color: "#000000".to_string(),
                ..crate::style::PathStyle::default()
            }))
            .build(&data(), &OverlayState::default());
        assert_eq!(
            property(&scene.sections.features[0], "style")["color"],
            "#000000"
        );
    }

    #[test]
    fn scene_serializes_to_json() {
        let view = view(MapVariant::Distritos).unwrap();
        let scene = SceneBuilder::new(&view).build(&data(), &OverlayState::default());
        let json: Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(json["variant"], "distritos");
        assert_eq!(json["tileLayer"]["maxZoom"], 17);
        assert_eq!(json["sections"]["type"], "FeatureCollection");
        assert_eq!(json["overlays"][0]["kind"], "district_centre");
    }
}
