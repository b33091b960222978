#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Offline tool for the census section maps.
//!
//! Loads the section geometry, population tables and boundary overlays
//! listed in a TOML config, then exports a map scene as JSON, prints the
//! population summary table, or reports join coverage per view.

mod config;
mod table;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use census_map_population::{
    join::join_by_identifier,
    load::{load_population_table, load_sections},
    summary::summarize,
};
use census_map_population_models::PopulationTable;
use census_map_render::{
    perimeter::{load_outline, load_perimeter, perimeter_info},
    registry::{all_views, view},
    scene::{SceneBuilder, SceneData},
    session::{JsonExport, MapSession, SceneState},
};
use census_map_section_models::CensusYear;
use census_map_view_state::{MapVariant, overlay::OverlayState};
use clap::{Parser, Subcommand};

use crate::config::DatasetConfig;

#[derive(Parser)]
#[command(name = "census_map_cli", about = "Census section map tool")]
struct Cli {
    /// Dataset config file
    #[arg(long, default_value = "census_map.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a map scene and write it as JSON
    Scene {
        /// Map view to build
        #[arg(long, default_value_t = MapVariant::Variation)]
        variant: MapVariant,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Open the perimeter information panel
        #[arg(long)]
        perimeter_info: bool,
    },
    /// Print the per-section population summary table
    Table {
        /// Current census year
        #[arg(long, default_value = "2024", value_parser = parse_census_year)]
        current: CensusYear,
        /// Baseline census year
        #[arg(long, default_value = "2011", value_parser = parse_census_year)]
        baseline: CensusYear,
    },
    /// Load every dataset and report join coverage per view
    Check,
}

/// Parses a calendar year into a [`CensusYear`].
fn parse_census_year(value: &str) -> Result<CensusYear, String> {
    let year: u16 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a year"))?;
    CensusYear::from_value(year).ok_or_else(|| {
        let known: Vec<String> = CensusYear::all().iter().map(ToString::to_string).collect();
        format!("no census for {year}: expected one of {}", known.join(", "))
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = DatasetConfig::load(&cli.config)?;

    match cli.command {
        Commands::Scene {
            variant,
            out,
            perimeter_info,
        } => export_scene(&config, variant, out, perimeter_info)?,
        Commands::Table { current, baseline } => print_table(&config, current, baseline)?,
        Commands::Check => check(&config)?,
    }

    Ok(())
}

/// Loads every configured dataset. Overlays absent from the config are
/// left empty.
fn load_data(config: &DatasetConfig) -> Result<SceneData, Box<dyn std::error::Error>> {
    let sections = load_sections(&config.resolve(&config.sections))?;

    let mut tables = Vec::with_capacity(config.tables.len());
    for year in config.tables.keys() {
        tables.push(load_population_table(&config.table_path(*year)?, *year)?);
    }

    let district_centre = match &config.district_centre {
        Some(path) => load_outline(&config.resolve(path))?,
        None => vec![],
    };
    let real_perimeter = config
        .real_perimeter
        .as_ref()
        .map(|path| load_perimeter(&config.resolve(path)))
        .transpose()?;
    let intramuros_perimeter = config
        .intramuros_perimeter
        .as_ref()
        .map(|path| load_perimeter(&config.resolve(path)))
        .transpose()?;

    Ok(SceneData {
        sections,
        tables,
        district_centre,
        real_perimeter,
        intramuros_perimeter,
    })
}

fn export_scene(
    config: &DatasetConfig,
    variant: MapVariant,
    out: Option<PathBuf>,
    open_perimeter_info: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = view(variant).ok_or_else(|| format!("No view registered for {variant}"))?;
    let data = load_data(config)?;

    let mut overlays = OverlayState::default();
    if open_perimeter_info {
        let info = data.real_perimeter.as_ref().and_then(perimeter_info);
        overlays = overlays.show_perimeter_info(info);
    }

    let scene = SceneBuilder::new(&view).build(&data, &overlays);

    let writer: Box<dyn Write> = match &out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    match MapSession::init(JsonExport::new(writer), &scene) {
        SceneState::Ready(session) => {
            drop(session.dispose());
        }
        SceneState::Error(message) => return Err(message.into()),
    }

    if let Some(path) = out {
        log::info!("Wrote {variant} scene to {}", path.display());
    }
    Ok(())
}

fn print_table(
    config: &DatasetConfig,
    current: CensusYear,
    baseline: CensusYear,
) -> Result<(), Box<dyn std::error::Error>> {
    let current_table = load_population_table(&config.table_path(current)?, current)?;
    let baseline_table = load_population_table(&config.table_path(baseline)?, baseline)?;

    let summary = summarize(&current_table, &baseline_table);
    print!("{}", table::render(&summary, current, baseline));
    Ok(())
}

fn check(config: &DatasetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let data = load_data(config)?;

    println!("Sections: {}", data.sections.len());
    for table in &data.tables {
        println!("Population {}: {} rows", table.year, table.records.len());
    }

    for view in all_views() {
        let Some(comparison) = view.comparison else {
            println!("{}: no population comparison", view.variant);
            continue;
        };

        let tables: Vec<PopulationTable> = data
            .tables
            .iter()
            .filter(|t| t.year == comparison.baseline || t.year == comparison.compare)
            .cloned()
            .collect();
        if tables.len() < 2 {
            println!(
                "{}: missing {} or {} population table",
                view.variant, comparison.baseline, comparison.compare
            );
            continue;
        }

        let records = join_by_identifier(&data.sections, &tables, view.join_policy);
        let complete = records
            .iter()
            .filter(|r| r.delta(comparison.baseline, comparison.compare).is_some())
            .count();
        println!(
            "{}: {complete}/{} sections with {} and {} data",
            view.variant,
            data.sections.len(),
            comparison.baseline,
            comparison.compare
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_table_years() {
        let cli = Cli::try_parse_from([
            "census_map_cli",
            "table",
            "--current",
            "2022",
            "--baseline",
            "2004",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Table {
                current: CensusYear::Y2022,
                baseline: CensusYear::Y2004
            }
        ));
    }

    #[test]
    fn table_years_default() {
        let cli = Cli::try_parse_from(["census_map_cli", "table"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Table {
                current: CensusYear::Y2024,
                baseline: CensusYear::Y2011
            }
        ));
        assert_eq!(cli.config, PathBuf::from("census_map.toml"));
    }

    #[test]
    fn rejects_unknown_census_year() {
        assert!(Cli::try_parse_from(["census_map_cli", "table", "--current", "1999"]).is_err());
        assert!(Cli::try_parse_from(["census_map_cli", "table", "--baseline", "soon"]).is_err());
        assert!(parse_census_year("1999").unwrap_err().contains("2004, 2011, 2022, 2024"));
    }

    #[test]
    fn parses_scene_args() {
        let cli = Cli::try_parse_from([
            "census_map_cli",
            "--config",
            "other.toml",
            "scene",
            "--variant",
            "distritos",
            "--perimeter-info",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        let Commands::Scene {
            variant,
            out,
            perimeter_info,
        } = cli.command
        else {
            panic!("expected the scene command");
        };
        assert_eq!(variant, MapVariant::Distritos);
        assert!(out.is_none());
        assert!(perimeter_info);
    }

    #[test]
    fn parses_check() {
        let cli = Cli::try_parse_from(["census_map_cli", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Check));
    }
}
