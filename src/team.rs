use bracket_data::Entrant;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A team in a game or bracket.
///
/// Identity is `(name, seed)`; `stats` is free-form data attached by analysis
/// code (season averages, ratings, ...) and is ignored by equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    name: String,
    seed: u8,
    #[serde(default)]
    pub stats: Map<String, Value>,
}

impl Team {
    pub fn new(name: impl Into<String>, seed: u8) -> Self {
        Self {
            name: name.into(),
            seed,
            stats: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> u8 {
        self.seed
    }

    pub fn stat(&self, key: &str) -> Option<&Value> {
        self.stats.get(key)
    }

    /// Convenience for numeric stats, the common case for decision functions.
    pub fn stat_f64(&self, key: &str) -> Option<f64> {
        self.stats.get(key).and_then(Value::as_f64)
    }
}

impl From<&Entrant> for Team {
    fn from(entrant: &Entrant) -> Self {
        Team::new(entrant.name.clone(), entrant.seed)
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.name == other.name
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.seed.hash(state);
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.seed, self.name)
    }
}
