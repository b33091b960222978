//! Boundary overlays: the Distrito Centro outline and the real and
//! intramuros perimeters.
//!
//! Overlays are drawn above the section layer and are never joined with
//! population data.

use std::path::Path;

use census_map_view_state::{
    MapVariant,
    overlay::{PerimeterInfo, PointsCount},
};
use geojson::{FeatureCollection, GeoJson, Geometry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{RenderError, style::PathStyle};

const DEFAULT_PERIMETER_NAME: &str = "Perímetro Real de Secciones";
const DEFAULT_PERIMETER_METHOD: &str = "polygon-union";
const DEFAULT_PERIMETER_DESCRIPTION: &str =
    "Perímetro exterior exacto obtenido por unión de polígonos";

/// A `(lat, lng)` vertex of a hand-traced outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    #[serde(alias = "long")]
    pub lng: f64,
}

/// Parses a hand-traced outline (`[{ "lat": .., "lng": .. }, ..]`).
///
/// # Errors
///
/// Returns [`RenderError::Json`] if the JSON is not an array of points.
pub fn parse_outline(json: &str) -> Result<Vec<LatLng>, RenderError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses an outline file.
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be read or parsed.
pub fn load_outline(path: &Path) -> Result<Vec<LatLng>, RenderError> {
    parse_outline(&read_file(path)?)
}

/// A perimeter `FeatureCollection`, optionally carrying a top-level
/// `metadata` object.
#[derive(Debug, Clone, PartialEq)]
pub struct Perimeter {
    /// The perimeter features.
    pub collection: FeatureCollection,
}

impl Perimeter {
    /// String or numeric metadata value, rendered as text.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<String> {
        let value = self
            .collection
            .foreign_members
            .as_ref()?
            .get("metadata")?
            .get(key)?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Parses a perimeter `FeatureCollection`.
///
/// # Errors
///
/// Returns [`RenderError::GeoJson`] if the document is not a
/// `FeatureCollection`.
pub fn parse_perimeter(json: &str) -> Result<Perimeter, RenderError> {
    Ok(Perimeter {
        collection: json.parse()?,
    })
}

/// Reads and parses a perimeter file.
///
/// # Errors
///
/// Returns [`RenderError`] if the file cannot be read or parsed.
pub fn load_perimeter(path: &Path) -> Result<Perimeter, RenderError> {
    parse_perimeter(&read_file(path)?)
}

/// Extracts the information panel contents from the first perimeter
/// feature. Returns `None` when the collection is empty.
#[must_use]
pub fn perimeter_info(perimeter: &Perimeter) -> Option<PerimeterInfo> {
    let feature = perimeter.collection.features.first()?;
    let text = |key: &str, default: &str| {
        feature
            .property(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    let sections = feature
        .property("sections")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(PerimeterInfo {
        name: text("name", DEFAULT_PERIMETER_NAME),
        method: text("method", DEFAULT_PERIMETER_METHOD),
        section_count: feature
            .property("sectionCount")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        sections,
        description: text("description", DEFAULT_PERIMETER_DESCRIPTION),
        points_count: outer_ring_points(feature.geometry.as_ref()),
    })
}

/// Vertex count of the first outer ring, closing vertex excluded.
fn outer_ring_points(geometry: Option<&Geometry>) -> PointsCount {
    let ring_len = geometry.and_then(|g| match &g.value {
        geojson::Value::Polygon(rings) => rings.first().map(Vec::len),
        geojson::Value::MultiPolygon(polygons) => {
            polygons.first().and_then(|p| p.first()).map(Vec::len)
        }
        _ => None,
    });
    match ring_len {
        Some(len) if len > 0 => PointsCount::Count(len - 1),
        _ => PointsCount::NotAvailable,
    }
}

/// What an overlay depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Administrative limits of the Distrito Centro.
    DistrictCentre,
    /// Exterior outline of the selected sections.
    RealPerimeter,
    /// Historic walled-city outline.
    IntramurosPerimeter,
}

/// A boundary overlay ready for the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// What the overlay depicts.
    pub kind: OverlayKind,
    /// Overlay geometry.
    pub geojson: GeoJson,
    /// Path style.
    pub style: PathStyle,
    /// Popup HTML, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
    /// Whether the overlay is currently added to the map.
    pub visible: bool,
}

/// Builds the Distrito Centro outline overlay. The styling depends on the
/// view it is drawn in. Returns `None` for an empty outline.
#[must_use]
pub fn district_centre_overlay(
    points: &[LatLng],
    variant: MapVariant,
    visible: bool,
) -> Option<Overlay> {
    if points.is_empty() {
        log::warn!("No Distrito Centro outline data available");
        return None;
    }

    let mut ring: Vec<Vec<f64>> = points.iter().map(|p| vec![p.lng, p.lat]).collect();
    if ring.first() != ring.last() {
        ring.push(ring[0].clone());
    }
    let geometry = Geometry::new(geojson::Value::Polygon(vec![ring]));

    let (style, popup) = if variant == MapVariant::Distritos {
        (
            PathStyle {
                weight: 3.0,
                color: "#ff6b35".to_string(),
                opacity: None,
                dash_array: "5, 5".to_string(),
                fill_color: Some("#ff6b35".to_string()),
                fill_opacity: 0.3,
                interactive: true,
            },
            format!(
                "<div class=\"distrito-popup\"><h4>Distrito Centro</h4>\
                 <p><strong>Tipo:</strong> Distrito Histórico</p>\
                 <p><strong>Coordenadas:</strong> {} puntos</p>\
                 <p><strong>Descripción:</strong> Delimitación del centro histórico de Jerez de la Frontera</p></div>",
                points.len()
            ),
        )
    } else {
        (
            PathStyle {
                weight: 10.0,
                color: "#2563eb".to_string(),
                opacity: Some(0.8),
                dash_array: "5, 5".to_string(),
                fill_color: Some("#3b82f6".to_string()),
                fill_opacity: 0.1,
                interactive: false,
            },
            "<h4>Distrito Centro</h4><p>Límites administrativos del distrito Centro de Jerez</p>"
                .to_string(),
        )
    };

    Some(Overlay {
        kind: OverlayKind::DistrictCentre,
        geojson: GeoJson::Geometry(geometry),
        style,
        popup: Some(popup),
        visible,
    })
}

/// Builds the real perimeter overlay (always visible).
#[must_use]
pub fn real_perimeter_overlay(perimeter: &Perimeter) -> Overlay {
    Overlay {
        kind: OverlayKind::RealPerimeter,
        geojson: GeoJson::FeatureCollection(perimeter.collection.clone()),
        style: PathStyle {
            weight: 6.0,
            color: "#ff0000".to_string(),
            opacity: Some(1.0),
            dash_array: String::new(),
            fill_color: Some("#ff0000".to_string()),
            fill_opacity: 0.15,
            interactive: false,
        },
        popup: None,
        visible: true,
    }
}

/// Builds the intramuros perimeter overlay.
#[must_use]
pub fn intramuros_overlay(perimeter: &Perimeter, visible: bool) -> Overlay {
    let popup = format!(
        "<h4>Perímetro Intramuros</h4>\
         <p><strong>Método:</strong> {}</p>\
         <p><strong>Secciones:</strong> {}</p>\
         <p><strong>Generado:</strong> {}</p>",
        perimeter.metadata("method").unwrap_or_else(|| "N/A".to_string()),
        perimeter.metadata("foundSections").unwrap_or_else(|| "0".to_string()),
        perimeter.metadata("generatedAt").unwrap_or_else(|| "N/A".to_string()),
    );

    Overlay {
        kind: OverlayKind::IntramurosPerimeter,
        geojson: GeoJson::FeatureCollection(perimeter.collection.clone()),
        style: PathStyle {
            weight: 4.0,
            color: "#00ff00".to_string(),
            opacity: Some(0.9),
            dash_array: "10, 5".to_string(),
            fill_color: Some("#00ff00".to_string()),
            fill_opacity: 0.1,
            interactive: false,
        },
        popup: Some(popup),
        visible,
    }
}

fn read_file(path: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.display().to_string(),
        source,
    })
}
