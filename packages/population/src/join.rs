//! Join of census section geometry with population tables.
//!
//! Each table is indexed by the identifier derived from its raw code
//! column; section geometry already carries its identifier. Rows whose
//! code is not a 10-character national code never participate.

use std::collections::BTreeMap;

use census_map_population_models::{
    EnrichedRecord, JoinPolicy, PopulationRecord, PopulationTable,
};
use census_map_section_models::{CensusSection, SectionId, codec::to_section_id};

/// Indexes a table by local section identifier.
///
/// Rows with unrecognised codes are skipped. When two rows map to the same
/// identifier the later one wins.
#[must_use]
pub fn index_table(table: &PopulationTable) -> BTreeMap<SectionId, &PopulationRecord> {
    let mut index = BTreeMap::new();
    let mut skipped = 0usize;

    for record in &table.records {
        if let Some(id) = to_section_id(&record.section_code) {
            index.insert(id, record);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::debug!(
            "Census year {}: skipped {skipped} rows with unrecognised section codes",
            table.year
        );
    }

    index
}

/// Joins sections with every table by section identifier.
///
/// Under [`JoinPolicy::Strict`] a section is kept only when every table
/// has a row for it and it has usable coordinates. Under
/// [`JoinPolicy::KeepMissing`] every section is kept and only the matched
/// years are filled in.
///
/// Output order follows `sections`.
#[must_use]
pub fn join_by_identifier(
    sections: &[CensusSection],
    tables: &[PopulationTable],
    policy: JoinPolicy,
) -> Vec<EnrichedRecord> {
    let indexes: Vec<_> = tables.iter().map(|t| (t.year, index_table(t))).collect();

    let mut records = Vec::with_capacity(sections.len());
    let mut dropped = 0usize;

    for section in sections {
        let mut population_by_year = BTreeMap::new();
        let mut name: Option<&str> = None;
        let mut complete = true;

        for (year, index) in &indexes {
            match index.get(&section.id) {
                Some(record) => {
                    population_by_year.insert(*year, record.population);
                    if name.is_none() && !record.name.is_empty() {
                        name = Some(record.name.as_str());
                    }
                }
                None => {
                    log::debug!("No {year} population data for section {}", section.id);
                    complete = false;
                }
            }
        }

        if policy == JoinPolicy::Strict {
            if !complete {
                dropped += 1;
                continue;
            }
            if !section.has_coordinates() {
                log::debug!("No coordinates for section {}", section.id);
                dropped += 1;
                continue;
            }
        }

        let name = name
            .map(str::to_string)
            .or_else(|| section.name.clone())
            .unwrap_or_default();

        records.push(EnrichedRecord {
            section: section.clone(),
            name,
            population_by_year,
        });
    }

    log::info!(
        "Joined {} of {} sections against {} tables ({dropped} dropped)",
        records.len(),
        sections.len(),
        tables.len()
    );

    records
}
