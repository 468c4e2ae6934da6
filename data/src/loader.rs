use crate::wire::{RawDataset, RawFinals, RawPairing, RawResults, RawYear};
use crate::{
    Dataset, Entrant, HistoricalResult, Region, SUPPORTED_YEARS, SemifinalPairing, YearRecord,
};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid dataset json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid record for {year}: {reason}")]
    Schema { year: String, reason: String },
}

fn schema_error(year: &str, reason: impl Into<String>) -> DataError {
    DataError::Schema {
        year: year.to_owned(),
        reason: reason.into(),
    }
}

impl Dataset {
    /// Parse a whole dataset document.
    pub fn from_json(json: &str) -> DataResult<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        map_dataset(raw)
    }

    /// Read and parse a dataset document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        debug!("loading bracket dataset from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_owned(),
            source,
        })?;
        let dataset = Self::from_json(&content)?;
        info!(
            "loaded {} tournament years from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Validate a single `{ "<year>": {...} }` document and add it, replacing
    /// any record already held for that year.
    pub fn add_year(&mut self, json: &str) -> DataResult<u16> {
        let raw: RawDataset = serde_json::from_str(json)?;
        let count = raw.len();
        let mut entries = raw.into_iter();
        let (Some((key, raw_year)), None) = (entries.next(), entries.next()) else {
            return Err(schema_error(
                "<document>",
                format!("expected exactly one year, found {count}"),
            ));
        };

        let record = map_year(&key, raw_year)?;
        let year = record.year;
        if self.insert(record).is_some() {
            debug!("replaced dataset record for {year}");
        }
        Ok(year)
    }
}

// ---------------------------------------------------------------------------
// Mapping: dataset wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_dataset(raw: RawDataset) -> DataResult<Dataset> {
    raw.into_iter()
        .map(|(key, raw_year)| map_year(&key, raw_year))
        .collect()
}

fn map_year(key: &str, raw: RawYear) -> DataResult<YearRecord> {
    let year: u16 = key
        .trim()
        .parse()
        .map_err(|_| schema_error(key, "year key is not a number"))?;
    if !SUPPORTED_YEARS.contains(&year) {
        return Err(schema_error(
            key,
            format!(
                "year must be between {} and {}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            ),
        ));
    }

    let mut regions: BTreeMap<Region, Vec<Entrant>> = BTreeMap::new();
    for (label, entrants) in raw.region {
        let region: Region = label.parse().map_err(|reason: String| schema_error(key, reason))?;
        let entrants = entrants
            .into_iter()
            .map(|e| Entrant {
                name: e.team,
                seed: e.seed,
            })
            .collect();
        if regions.insert(region, entrants).is_some() {
            return Err(schema_error(key, format!("region {region} listed twice")));
        }
    }

    let finals = raw.finals.map(|f| map_finals(key, f)).transpose()?;
    let results = raw.results.map(map_results);

    Ok(YearRecord {
        year,
        regions,
        finals,
        results,
    })
}

fn map_finals(key: &str, raw: RawFinals) -> DataResult<[SemifinalPairing; 2]> {
    let pairing = |p: RawPairing| -> DataResult<SemifinalPairing> {
        let parse = |label: &str| {
            label
                .parse::<Region>()
                .map_err(|reason| schema_error(key, format!("finals: {reason}")))
        };
        Ok(SemifinalPairing {
            top: parse(&p.team1)?,
            bottom: parse(&p.team2)?,
        })
    };
    let games = [pairing(raw.game1)?, pairing(raw.game2)?];

    let distinct: BTreeSet<Region> = games.iter().flat_map(|g| [g.top, g.bottom]).collect();
    if distinct.len() != Region::ALL.len() {
        return Err(schema_error(
            key,
            "finals must pair four distinct regions",
        ));
    }
    Ok(games)
}

fn map_results(raw: RawResults) -> HistoricalResult {
    let names = |teams: Vec<crate::wire::RawResultTeam>| -> Vec<String> {
        teams.into_iter().map(|t| t.team).collect()
    };
    HistoricalResult {
        second: names(raw.second),
        sweet16: names(raw.sweet16),
        elite8: names(raw.elite8),
        final4: names(raw.final4),
        championship: names(raw.championship),
        winner: raw.winner,
    }
}
