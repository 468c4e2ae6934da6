use crate::team::Team;
use bracket_data::{HistoricalResult, RoundKind};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Rounds that earn points, with the points per correct team.
pub const ROUND_POINTS: [(RoundKind, u32); 5] = [
    (RoundKind::Second, 1),
    (RoundKind::Sweet16, 2),
    (RoundKind::Elite8, 4),
    (RoundKind::FinalFour, 8),
    (RoundKind::Championship, 16),
];

pub const CHAMPION_POINTS: u32 = 32;

/// 32 + 16 + 8 + 4 + 2 teams advancing, plus the champion.
pub const MAX_GAMES_CORRECT: u32 = 63;

/// Every round is worth 32 points when picked perfectly.
pub const MAX_TOTAL_SCORE: u32 = 192;

/// How a simulated bracket compares with what actually happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    /// Correct teams per scoring round, in `ROUND_POINTS` order.
    pub correct: [u32; 5],
    pub champion_correct: bool,
    pub games_correct: u32,
    pub total_score: u32,
}

impl Scorecard {
    /// Compare the teams the simulation advanced into each round, and its
    /// champion, against the recorded results. Teams match by name.
    pub fn tally<'a>(
        advanced: impl Fn(RoundKind) -> &'a [Team],
        champion: &Team,
        result: &HistoricalResult,
    ) -> Self {
        let mut card = Scorecard::default();
        for (idx, (round, points)) in ROUND_POINTS.into_iter().enumerate() {
            let actual: HashSet<&str> = result.reached(round).iter().map(String::as_str).collect();
            let simulated: HashSet<&str> = advanced(round).iter().map(Team::name).collect();
            let correct = simulated.intersection(&actual).count() as u32;

            card.correct[idx] = correct;
            card.games_correct += correct;
            card.total_score += correct * points;
        }

        card.champion_correct = champion.name() == result.winner;
        if card.champion_correct {
            card.games_correct += 1;
            card.total_score += CHAMPION_POINTS;
        }
        card
    }

    /// Correct teams for one scoring round; zero for the first round.
    pub fn correct_in(&self, round: RoundKind) -> u32 {
        ROUND_POINTS
            .iter()
            .position(|(r, _)| *r == round)
            .map(|idx| self.correct[idx])
            .unwrap_or(0)
    }
}

impl fmt::Display for Scorecard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of games correct: {}/{MAX_GAMES_CORRECT}", self.games_correct)?;
        write!(f, "Total Score: {}/{MAX_TOTAL_SCORE}", self.total_score)
    }
}
