//! Synthetic fields and datasets shared by the unit tests.
//!
//! Teams are named after their region and seed ("East 1", "South 16"), so a
//! bracket where every favorite wins is easy to write down by hand.

use crate::game::Game;
use crate::team::Team;
use bracket_data::{Dataset, Entrant, HistoricalResult, Region, SemifinalPairing, YearRecord};

pub const PAIRINGS: [SemifinalPairing; 2] = [
    SemifinalPairing {
        top: Region::East,
        bottom: Region::Midwest,
    },
    SemifinalPairing {
        top: Region::West,
        bottom: Region::South,
    },
];

/// Always the lower seed.
pub fn favorite(game: &Game) -> Team {
    game.favorite().clone()
}

/// Sixteen teams in seed order.
pub fn region_field(region: Region) -> Vec<Team> {
    (1..=16)
        .map(|seed| Team::new(format!("{region} {seed}"), seed))
        .collect()
}

fn names_for_seeds(seeds: &[u8]) -> Vec<String> {
    Region::ALL
        .into_iter()
        .flat_map(|region| seeds.iter().map(move |seed| format!("{region} {seed}")))
        .collect()
}

/// What happens when every favorite wins and `PAIRINGS` decides the semifinals.
pub fn chalk_result() -> HistoricalResult {
    HistoricalResult {
        second: names_for_seeds(&[1, 8, 5, 4, 6, 3, 7, 2]),
        sweet16: names_for_seeds(&[1, 4, 3, 2]),
        elite8: names_for_seeds(&[1, 2]),
        final4: names_for_seeds(&[1]),
        championship: vec!["East 1".into(), "West 1".into()],
        winner: "East 1".into(),
    }
}

pub fn chalk_record(year: u16) -> YearRecord {
    let regions = Region::ALL
        .into_iter()
        .map(|region| {
            let entrants = region_field(region)
                .iter()
                .map(|team| Entrant {
                    name: team.name().to_owned(),
                    seed: team.seed(),
                })
                .collect();
            (region, entrants)
        })
        .collect();

    YearRecord {
        year,
        regions,
        finals: Some(PAIRINGS),
        results: Some(chalk_result()),
    }
}

pub fn chalk_dataset(year: u16) -> Dataset {
    std::iter::once(chalk_record(year)).collect()
}
