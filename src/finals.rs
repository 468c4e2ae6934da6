use crate::error::{BracketError, BracketResult};
use crate::game::{self, Game};
use crate::picker::Picker;
use crate::team::Team;
use bracket_data::{Region, RoundKind, SemifinalPairing};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// National semifinals and championship.
///
/// Which regions meet in each semifinal changes from year to year, so the
/// pairings come from the dataset rather than from region order.
#[derive(Debug, Clone)]
pub struct FinalsBracket {
    year: u16,
    pairings: Option<[SemifinalPairing; 2]>,
    semifinals: Vec<Game>,
    championship: Option<Game>,
    winner: Option<Team>,
}

impl FinalsBracket {
    pub fn new(year: u16, pairings: Option<[SemifinalPairing; 2]>) -> Self {
        Self {
            year,
            pairings,
            semifinals: Vec::new(),
            championship: None,
            winner: None,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn pairings(&self) -> Option<&[SemifinalPairing; 2]> {
        self.pairings.as_ref()
    }

    /// Both semifinal games, or nothing before `set_matches`.
    pub fn semifinals(&self) -> &[Game] {
        &self.semifinals
    }

    pub fn championship(&self) -> Option<&Game> {
        self.championship.as_ref()
    }

    pub fn winner(&self) -> Option<&Team> {
        self.winner.as_ref()
    }

    /// Build the semifinals from each region's winner.
    pub fn set_matches(&mut self, region_winners: &HashMap<Region, Team>) -> BracketResult<&[Game]> {
        let semifinals = self.plan_matches(region_winners)?;
        Ok(self.commit_matches(semifinals))
    }

    /// Play both semifinals and set up the championship game.
    pub fn run_semifinals(&mut self, picker: &mut dyn Picker) -> BracketResult<&Game> {
        if self.semifinals.len() != 2 {
            return Err(BracketError::precondition(
                "the final four matchups have not been set",
            ));
        }
        let winners = game::resolve_all(&self.semifinals, picker)?;
        let mut finalists = game::pair_winners(winners, RoundKind::Championship).into_iter();
        let Some(championship) = finalists.next() else {
            return Err(BracketError::precondition("semifinals produced no finalists"));
        };

        debug!("{} championship: {championship}", self.year);
        self.winner = None;
        Ok(self.championship.insert(championship))
    }

    /// Play the championship game and record the national champion.
    pub fn run_championship(&mut self, picker: &mut dyn Picker) -> BracketResult<&Team> {
        let Some(championship) = &self.championship else {
            return Err(BracketError::precondition(
                "the final four must be played before the championship",
            ));
        };
        let winner = championship.resolve(picker)?;
        Ok(self.winner.insert(winner))
    }

    pub(crate) fn plan_matches(&self, region_winners: &HashMap<Region, Team>) -> BracketResult<Vec<Game>> {
        let Some(pairings) = &self.pairings else {
            return Err(BracketError::precondition(format!(
                "no final four pairings recorded for {}",
                self.year
            )));
        };
        let winner_of = |region: Region| {
            region_winners.get(&region).cloned().ok_or_else(|| {
                BracketError::precondition(format!("{region} region has no winner yet"))
            })
        };

        pairings
            .iter()
            .map(|p| -> BracketResult<Game> {
                Ok(Game::new(
                    winner_of(p.top)?,
                    winner_of(p.bottom)?,
                    RoundKind::FinalFour,
                ))
            })
            .collect()
    }

    pub(crate) fn commit_matches(&mut self, semifinals: Vec<Game>) -> &[Game] {
        self.semifinals = semifinals;
        self.championship = None;
        self.winner = None;
        &self.semifinals
    }

    /// Back to the state before `set_matches`.
    pub(crate) fn reset(&mut self) {
        self.semifinals.clear();
        self.championship = None;
        self.winner = None;
    }

    pub(crate) fn set_team_stat(&mut self, name: &str, key: &str, value: &Value) {
        let copies = self
            .semifinals
            .iter_mut()
            .chain(self.championship.iter_mut())
            .flat_map(Game::teams_mut)
            .chain(self.winner.iter_mut());
        for team in copies.filter(|t| t.name() == name) {
            team.stats.insert(key.to_owned(), value.clone());
        }
    }
}

impl fmt::Display for FinalsBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Winner:\n-------")?;
        if let Some(winner) = &self.winner {
            writeln!(f, "  {winner}")?;
        }
        writeln!(f, "Championship:\n-------------")?;
        if let Some(game) = &self.championship {
            writeln!(f, "  {} vs {}", game.top(), game.bottom())?;
        }
        writeln!(f, "Final Four:\n-----------")?;
        for game in &self.semifinals {
            writeln!(f, "  {} vs {}", game.top(), game.bottom())?;
        }
        Ok(())
    }
}
