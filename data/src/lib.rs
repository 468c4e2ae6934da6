pub mod loader;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub use loader::{DataError, DataResult};

/// Tournament years covered by the historical dataset.
pub const SUPPORTED_YEARS: RangeInclusive<u16> = 1985..=2019;

// ---------------------------------------------------------------------------
// Domain types: a clean model, independent of the dataset JSON shape
// ---------------------------------------------------------------------------

/// One of the four regional sub-brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    East,
    West,
    Midwest,
    South,
}

impl Region {
    /// Canonical order used when flattening per-region results.
    pub const ALL: [Region; 4] = [Region::East, Region::West, Region::Midwest, Region::South];

    pub fn label(&self) -> &'static str {
        match self {
            Region::East => "East",
            Region::West => "West",
            Region::Midwest => "Midwest",
            Region::South => "South",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown region {s:?}"))
    }
}

/// Tournament rounds, ordered from earliest to latest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoundKind {
    #[default]
    First, // Round of 64
    Second, // Round of 32
    Sweet16,
    Elite8,    // Regional final
    FinalFour, // National semifinals
    Championship,
}

impl RoundKind {
    pub const ALL: [RoundKind; 6] = [
        RoundKind::First,
        RoundKind::Second,
        RoundKind::Sweet16,
        RoundKind::Elite8,
        RoundKind::FinalFour,
        RoundKind::Championship,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoundKind::First => "Round 1",
            RoundKind::Second => "Round 2",
            RoundKind::Sweet16 => "Sweet 16",
            RoundKind::Elite8 => "Elite 8",
            RoundKind::FinalFour => "Final Four",
            RoundKind::Championship => "Championship",
        }
    }

    /// Round number as used in bracket listings, 1 through 6.
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(usize::from(idx)))
            .copied()
    }

    /// Zero-based position, for indexing per-round arrays.
    pub fn index(&self) -> usize {
        match self {
            RoundKind::First => 0,
            RoundKind::Second => 1,
            RoundKind::Sweet16 => 2,
            RoundKind::Elite8 => 3,
            RoundKind::FinalFour => 4,
            RoundKind::Championship => 5,
        }
    }

    pub fn is_final_four(&self) -> bool {
        matches!(self, RoundKind::FinalFour | RoundKind::Championship)
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            RoundKind::First => None,
            RoundKind::Second => Some(RoundKind::First),
            RoundKind::Sweet16 => Some(RoundKind::Second),
            RoundKind::Elite8 => Some(RoundKind::Sweet16),
            RoundKind::FinalFour => Some(RoundKind::Elite8),
            RoundKind::Championship => Some(RoundKind::FinalFour),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            RoundKind::First => Some(RoundKind::Second),
            RoundKind::Second => Some(RoundKind::Sweet16),
            RoundKind::Sweet16 => Some(RoundKind::Elite8),
            RoundKind::Elite8 => Some(RoundKind::FinalFour),
            RoundKind::FinalFour => Some(RoundKind::Championship),
            RoundKind::Championship => None,
        }
    }
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A team as listed in a region's field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    pub seed: u8,
}

/// Which two regional champions meet in one national semifinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemifinalPairing {
    pub top: Region,
    pub bottom: Region,
}

/// Names of the teams that actually reached each round, plus the champion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalResult {
    pub second: Vec<String>,
    pub sweet16: Vec<String>,
    pub elite8: Vec<String>,
    pub final4: Vec<String>,
    pub championship: Vec<String>,
    pub winner: String,
}

impl HistoricalResult {
    /// Teams recorded as reaching `round`. Every team reaches the first round,
    /// which is not recorded.
    pub fn reached(&self, round: RoundKind) -> &[String] {
        match round {
            RoundKind::First => &[],
            RoundKind::Second => &self.second,
            RoundKind::Sweet16 => &self.sweet16,
            RoundKind::Elite8 => &self.elite8,
            RoundKind::FinalFour => &self.final4,
            RoundKind::Championship => &self.championship,
        }
    }
}

/// Everything the dataset knows about one tournament year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u16,
    pub regions: BTreeMap<Region, Vec<Entrant>>,
    /// None when the year's semifinal pairings were never recorded.
    pub finals: Option<[SemifinalPairing; 2]>,
    /// None for a field whose results are not known yet.
    pub results: Option<HistoricalResult>,
}

impl YearRecord {
    /// Field for one region, in dataset order. Empty if the region is missing.
    pub fn entrants(&self, region: Region) -> &[Entrant] {
        self.regions.get(&region).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Read-only collection of tournament years, keyed by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    years: BTreeMap<u16, YearRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, year: u16) -> Option<&YearRecord> {
        self.years.get(&year)
    }

    pub fn contains(&self, year: u16) -> bool {
        self.years.contains_key(&year)
    }

    /// Years present, ascending.
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.years.keys().copied()
    }

    /// Earliest through latest year present, if any.
    pub fn year_range(&self) -> Option<RangeInclusive<u16>> {
        let first = self.years.keys().next()?;
        let last = self.years.keys().next_back()?;
        Some(*first..=*last)
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, record: YearRecord) -> Option<YearRecord> {
        self.years.insert(record.year, record)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<YearRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = YearRecord>>(iter: I) -> Self {
        Self {
            years: iter.into_iter().map(|r| (r.year, r)).collect(),
        }
    }
}
