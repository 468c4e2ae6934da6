use crate::error::{BracketError, BracketResult};
use crate::simulators::UpsetProbability;
use bracket_data::Dataset;
use log::debug;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATASET_VAR: &str = "BRACKETOLOGY_DATASET";
pub const UPSET_PROBABILITY_VAR: &str = "BRACKETOLOGY_UPSET_PROBABILITY";
pub const SEED_VAR: &str = "BRACKETOLOGY_SEED";

/// Runtime configuration, read from `BRACKETOLOGY_*` environment variables.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
    pub dataset_path: Option<PathBuf>,
    /// Chance that any single game goes to the underdog.
    pub upset_probability: f64,
    /// Fixed RNG seed; unset means a fresh seed every run.
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load() -> BracketResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BracketResult<Self> {
        let settings = Self {
            dataset_path: lookup(DATASET_VAR)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            upset_probability: parse_var::<f64, _>(&lookup, UPSET_PROBABILITY_VAR)?.unwrap_or(0.0),
            seed: parse_var::<u64, _>(&lookup, SEED_VAR)?,
        };
        debug!("{settings:?}");
        Ok(settings)
    }

    pub fn load_dataset(&self) -> BracketResult<Dataset> {
        let Some(path) = &self.dataset_path else {
            return Err(BracketError::invalid(format!("{DATASET_VAR} is not set")));
        };
        Ok(Dataset::from_path(path)?)
    }

    /// The upset picker these settings describe.
    pub fn picker(&self) -> BracketResult<UpsetProbability> {
        match self.seed {
            Some(seed) => UpsetProbability::seeded(self.upset_probability, seed),
            None => UpsetProbability::new(self.upset_probability),
        }
    }
}

fn parse_var<T, L>(lookup: L, key: &str) -> BracketResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    L: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| BracketError::invalid(format!("{key}={raw:?}: {e}")))
}
