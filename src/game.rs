use crate::error::{BracketError, BracketResult};
use crate::picker::Picker;
use crate::team::Team;
use bracket_data::RoundKind;
use log::warn;
use std::fmt;

/// A game between two teams. "Top" and "bottom" are bracket positions, not
/// seeds: the top team sits closest to the top of the bracket sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    top: Team,
    bottom: Team,
    round: RoundKind,
}

impl Game {
    pub fn new(top: Team, bottom: Team, round: RoundKind) -> Self {
        Self { top, bottom, round }
    }

    pub fn top(&self) -> &Team {
        &self.top
    }

    pub fn bottom(&self) -> &Team {
        &self.bottom
    }

    pub fn round(&self) -> RoundKind {
        self.round
    }

    pub fn teams(&self) -> [&Team; 2] {
        [&self.top, &self.bottom]
    }

    /// The lower seed number; the top team when seeds tie.
    pub fn favorite(&self) -> &Team {
        if self.top.seed() <= self.bottom.seed() {
            &self.top
        } else {
            &self.bottom
        }
    }

    pub fn underdog(&self) -> &Team {
        if self.top.seed() <= self.bottom.seed() {
            &self.bottom
        } else {
            &self.top
        }
    }

    pub fn contains(&self, team: &Team) -> bool {
        self.top == *team || self.bottom == *team
    }

    /// Ask `picker` for the winner and check it actually played in this game.
    pub fn resolve(&self, picker: &mut dyn Picker) -> BracketResult<Team> {
        let pick = picker.pick(self);
        if self.contains(&pick) {
            Ok(pick)
        } else {
            warn!("rejected pick {pick} for {self}");
            Err(BracketError::invalid(format!(
                "picked {pick}, who is not playing in {self}"
            )))
        }
    }

    pub(crate) fn teams_mut(&mut self) -> [&mut Team; 2] {
        [&mut self.top, &mut self.bottom]
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} vs {}", self.round, self.top, self.bottom)
    }
}

/// Resolve every game in bracket order. Nothing is applied if any pick is
/// rejected.
pub(crate) fn resolve_all(games: &[Game], picker: &mut dyn Picker) -> BracketResult<Vec<Team>> {
    games.iter().map(|game| game.resolve(picker)).collect()
}

/// Pair adjacent winners into the games of `round`.
pub(crate) fn pair_winners(winners: Vec<Team>, round: RoundKind) -> Vec<Game> {
    let mut games = Vec::with_capacity(winners.len() / 2);
    let mut winners = winners.into_iter();
    while let (Some(top), Some(bottom)) = (winners.next(), winners.next()) {
        games.push(Game::new(top, bottom, round));
    }
    games
}
