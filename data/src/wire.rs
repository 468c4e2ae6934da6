//! Wire types for the historical bracket dataset.
//! Shape: `{ "<year>": { "Region": {...}, "Finals": {...}, "Results": {...} } }`

use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level document: year string → record.
pub type RawDataset = BTreeMap<String, RawYear>;

#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawYear {
    #[serde(rename = "Region")]
    pub region: BTreeMap<String, Vec<RawEntrant>>,
    #[serde(rename = "Finals", default)]
    pub finals: Option<RawFinals>,
    #[serde(rename = "Results", default)]
    pub results: Option<RawResults>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawEntrant {
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Seed")]
    pub seed: u8,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawFinals {
    pub game1: RawPairing,
    pub game2: RawPairing,
}

/// Region labels, not team names.
#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawPairing {
    pub team1: String,
    pub team2: String,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawResults {
    #[serde(default)]
    pub second: Vec<RawResultTeam>,
    #[serde(default)]
    pub sweet16: Vec<RawResultTeam>,
    #[serde(default)]
    pub elite8: Vec<RawResultTeam>,
    #[serde(default)]
    pub final4: Vec<RawResultTeam>,
    #[serde(default)]
    pub championship: Vec<RawResultTeam>,
    pub winner: String,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct RawResultTeam {
    #[serde(rename = "Team")]
    pub team: String,
    /// Older records list names only.
    #[serde(rename = "Seed", default)]
    pub seed: Option<u8>,
}
