//! Round-by-round simulation of the 64-team NCAA tournament bracket.
//!
//! A [`Tournament`] is seeded from one year of a [`Dataset`], played through
//! six rounds with a [`Picker`] deciding each game, and scored against what
//! actually happened that year.
//!
//! ```no_run
//! use bracketology::{Settings, Tournament};
//!
//! # fn main() -> bracketology::BracketResult<()> {
//! let settings = Settings::load()?;
//! let dataset = settings.load_dataset()?;
//! let mut picker = settings.picker()?;
//!
//! let mut tournament = Tournament::new(&dataset, 2019)?;
//! let card = tournament.score(Some(&mut picker), true)?;
//! println!("{card}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod finals;
pub mod game;
pub mod picker;
pub mod region;
pub mod scoring;
pub mod settings;
pub mod simulators;
pub mod team;
pub mod tournament;

#[cfg(test)]
mod test_support;

pub use bracket_data::{
    DataError, Dataset, Entrant, HistoricalResult, Region, RoundKind, SUPPORTED_YEARS,
    SemifinalPairing, YearRecord,
};
pub use error::{BracketError, BracketResult};
pub use finals::FinalsBracket;
pub use game::Game;
pub use picker::Picker;
pub use region::RegionalBracket;
pub use scoring::Scorecard;
pub use settings::Settings;
pub use simulators::UpsetProbability;
pub use team::Team;
pub use tournament::Tournament;
