//! Loading of raw population tables and census section geometry.
//!
//! Population tables are arrays of
//! `{ "Código sección": string|number, "Nombre": string, "Población <year>": number }`.
//! Section geometry is a `GeoJSON` `FeatureCollection` whose features carry
//! `ID`, `lat` and `long` properties.

use std::path::Path;

use census_map_population_models::{PopulationRecord, PopulationTable};
use census_map_section_models::{CensusSection, CensusYear, SectionId};
use serde_json::Value;

use crate::LoadError;

/// Column holding the national section code.
pub const CODE_COLUMN: &str = "Código sección";

/// Column holding the section name.
pub const NAME_COLUMN: &str = "Nombre";

/// Code used by the source tables for the aggregate row.
pub const TOTAL_CODE: &str = "TOTAL";

/// Parses a population table for `year` from a JSON string.
///
/// # Errors
///
/// Returns [`LoadError`] if the JSON is malformed or any row lacks a code
/// or a non-negative integer population for `year`.
pub fn parse_population_table(json: &str, year: CensusYear) -> Result<PopulationTable, LoadError> {
    let rows: Vec<serde_json::Map<String, Value>> = serde_json::from_str(json)?;
    let column = year.population_column();

    let records = rows
        .iter()
        .enumerate()
        .map(|(row, fields)| parse_population_row(row, fields, year, &column))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Loaded {} rows for census year {year}", records.len());

    Ok(PopulationTable { year, records })
}

/// Reads and parses a population table file.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or fails validation.
pub fn load_population_table(path: &Path, year: CensusYear) -> Result<PopulationTable, LoadError> {
    parse_population_table(&read_file(path)?, year)
}

fn parse_population_row(
    row: usize,
    fields: &serde_json::Map<String, Value>,
    year: CensusYear,
    column: &str,
) -> Result<PopulationRecord, LoadError> {
    let section_code = match fields.get(CODE_COLUMN) {
        Some(Value::String(code)) => code.clone(),
        Some(Value::Number(code)) => code.to_string(),
        Some(other) => return Err(invalid(row, CODE_COLUMN, other)),
        None => return Err(missing(row, CODE_COLUMN)),
    };

    let name = match fields.get(NAME_COLUMN) {
        Some(Value::String(name)) => name.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => return Err(invalid(row, NAME_COLUMN, other)),
    };

    let population = match fields.get(column) {
        Some(value) => value
            .as_u64()
            .or_else(|| {
                // Some exports write whole numbers as floats (e.g. `1234.0`).
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| {
                        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                        let whole = f as u64;
                        whole
                    })
            })
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| invalid(row, column, value))?,
        None => return Err(missing(row, column)),
    };

    Ok(PopulationRecord {
        section_code,
        year,
        population,
        name,
    })
}

/// Parses census sections from a `GeoJSON` `FeatureCollection` string.
///
/// # Errors
///
/// Returns [`LoadError`] if the document is not a `FeatureCollection` or a
/// feature lacks a string `ID` property.
pub fn parse_sections(geojson_str: &str) -> Result<Vec<CensusSection>, LoadError> {
    let collection: geojson::FeatureCollection = geojson_str.parse()?;

    let sections = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(row, feature)| section_from_feature(row, feature))
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Loaded {} census sections", sections.len());

    Ok(sections)
}

/// Reads and parses a census section `GeoJSON` file.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or fails validation.
pub fn load_sections(path: &Path) -> Result<Vec<CensusSection>, LoadError> {
    parse_sections(&read_file(path)?)
}

fn section_from_feature(row: usize, feature: geojson::Feature) -> Result<CensusSection, LoadError> {
    let properties = feature.properties.unwrap_or_default();

    let id = match properties.get("ID") {
        Some(Value::String(id)) => SectionId::from(id.as_str()),
        Some(other) => return Err(invalid(row, "ID", other)),
        None => return Err(missing(row, "ID")),
    };

    let name = properties
        .get(NAME_COLUMN)
        .or_else(|| properties.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(CensusSection {
        id,
        geometry: feature.geometry,
        latitude: coordinate(row, &properties, "lat")?,
        longitude: coordinate(row, &properties, "long")?,
        name,
    })
}

fn coordinate(
    row: usize,
    properties: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<Option<f64>, LoadError> {
    match properties.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(invalid(row, field, other)),
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn missing(row: usize, field: &str) -> LoadError {
    LoadError::MissingField {
        row,
        field: field.to_string(),
    }
}

fn invalid(row: usize, field: &str, value: &Value) -> LoadError {
    LoadError::InvalidField {
        row,
        field: field.to_string(),
        value: value.to_string(),
    }
}
