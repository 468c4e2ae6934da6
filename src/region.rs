use crate::error::{BracketError, BracketResult};
use crate::game::{self, Game};
use crate::picker::Picker;
use crate::team::Team;
use bracket_data::{Region, RoundKind};
use log::debug;
use serde_json::Value;
use std::fmt;

pub const TEAMS_PER_REGION: usize = 16;

/// Round-1 seed pairings, top to bottom of the regional sheet.
pub const FIRST_ROUND_SEEDS: [(u8, u8); 8] = [
    (1, 16),
    (8, 9),
    (5, 12),
    (4, 13),
    (6, 11),
    (3, 14),
    (7, 10),
    (2, 15),
];

/// Regional rounds, in order. The elite eight game decides the region.
const REGIONAL_ROUNDS: usize = 4;

/// One 16-team region: 8 + 4 + 2 + 1 games across four rounds.
#[derive(Debug, Clone)]
pub struct RegionalBracket {
    region: Region,
    teams: Vec<Team>,
    rounds: [Vec<Game>; REGIONAL_ROUNDS],
    winner: Option<Team>,
}

impl RegionalBracket {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            teams: Vec::new(),
            rounds: Default::default(),
            winner: None,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Entrants in seed order. Empty until the first round is initialized.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Games of `round`; always empty for the final four and championship.
    pub fn games(&self, round: RoundKind) -> &[Game] {
        round_slot(round)
            .map(|idx| self.rounds[idx].as_slice())
            .unwrap_or_default()
    }

    /// The team this region sends to the final four.
    pub fn winner(&self) -> Option<&Team> {
        self.winner.as_ref()
    }

    /// Seed the region and build its round-1 games.
    ///
    /// `teams` must hold exactly 16 teams sorted by seed, 1 through 16.
    pub fn initialize_first_round(&mut self, teams: Vec<Team>) -> BracketResult<()> {
        let seeded_in_order = teams.len() == TEAMS_PER_REGION
            && teams
                .iter()
                .enumerate()
                .all(|(idx, team)| usize::from(team.seed()) == idx + 1);
        if !seeded_in_order {
            return Err(BracketError::invalid(format!(
                "{} region needs {TEAMS_PER_REGION} teams ordered by seed 1-16",
                self.region
            )));
        }

        let slot = |seed: u8| teams[usize::from(seed) - 1].clone();
        let first_round = FIRST_ROUND_SEEDS
            .iter()
            .map(|&(top, bottom)| Game::new(slot(top), slot(bottom), RoundKind::First))
            .collect();

        self.rounds = Default::default();
        self.rounds[0] = first_round;
        self.teams = teams;
        self.winner = None;
        Ok(())
    }

    /// Build `round` (second round, sweet sixteen or elite eight) by
    /// resolving every game of the round before it.
    pub fn run_round(&mut self, round: RoundKind, picker: &mut dyn Picker) -> BracketResult<&[Game]> {
        let games = self.plan_round(round, picker)?;
        Ok(self.commit_round(round, games))
    }

    /// Resolve the regional final and record the region's winner.
    pub fn run_elite_eight(&mut self, picker: &mut dyn Picker) -> BracketResult<&Team> {
        let winner = self.plan_winner(picker)?;
        Ok(self.set_winner(winner))
    }

    /// Play the whole region from the first round through the elite eight.
    pub fn run_bracket(&mut self, picker: &mut dyn Picker) -> BracketResult<&Team> {
        for round in [RoundKind::Second, RoundKind::Sweet16, RoundKind::Elite8] {
            self.run_round(round, picker)?;
        }
        self.run_elite_eight(picker)
    }

    /// Set a stat on every copy of the named team held by this region.
    /// Returns whether the team plays here.
    pub fn set_team_stat(&mut self, name: &str, key: &str, value: Value) -> bool {
        let mut found = false;
        let copies = self
            .teams
            .iter_mut()
            .chain(self.rounds.iter_mut().flatten().flat_map(Game::teams_mut))
            .chain(self.winner.iter_mut());
        for team in copies.filter(|t| t.name() == name) {
            team.stats.insert(key.to_owned(), value.clone());
            found = true;
        }
        found
    }

    /// Resolve the round before `round` without touching the bracket.
    pub(crate) fn plan_round(&self, round: RoundKind, picker: &mut dyn Picker) -> BracketResult<Vec<Game>> {
        let (Some(idx), Some(prev)) = (round_slot(round), round.prev()) else {
            return Err(BracketError::invalid(format!(
                "{round} is not a regional round that can be advanced to"
            )));
        };
        let previous = &self.rounds[idx - 1];
        if previous.is_empty() {
            return Err(BracketError::precondition(format!(
                "{} region: {prev} must be played before {round}",
                self.region
            )));
        }

        let winners = game::resolve_all(previous, picker)?;
        Ok(game::pair_winners(winners, round))
    }

    /// Store freshly built games for `round`, discarding anything after it.
    pub(crate) fn commit_round(&mut self, round: RoundKind, games: Vec<Game>) -> &[Game] {
        let idx = round.index();
        debug!("{} region: {} games in {round}", self.region, games.len());
        for later in &mut self.rounds[idx + 1..] {
            later.clear();
        }
        self.winner = None;
        self.rounds[idx] = games;
        &self.rounds[idx]
    }

    /// Resolve the elite eight game without touching the bracket.
    pub(crate) fn plan_winner(&self, picker: &mut dyn Picker) -> BracketResult<Team> {
        let Some(final_game) = self.rounds[REGIONAL_ROUNDS - 1].first() else {
            return Err(BracketError::precondition(format!(
                "{} region: {} games have not been set",
                self.region,
                RoundKind::Elite8
            )));
        };
        final_game.resolve(picker)
    }

    /// Back to the seeded first round.
    pub(crate) fn reset(&mut self) {
        for later in &mut self.rounds[1..] {
            later.clear();
        }
        self.winner = None;
    }

    pub(crate) fn set_winner(&mut self, winner: Team) -> &Team {
        debug!("{} region won by {winner}", self.region);
        self.winner.insert(winner)
    }
}

/// Index into the regional round arrays, for rounds played inside a region.
fn round_slot(round: RoundKind) -> Option<usize> {
    (!round.is_final_four()).then(|| round.index())
}

impl fmt::Display for RegionalBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!("{} Region", self.region);
        writeln!(f, "{header}\n{}", "-".repeat(header.len()))?;
        for (idx, games) in self.rounds.iter().enumerate() {
            let label = RoundKind::ALL[idx].label();
            writeln!(f, "{label}:\n{}", "-".repeat(label.len() + 1))?;
            for game in games {
                writeln!(f, "  {} vs {}", game.top(), game.bottom())?;
            }
        }
        writeln!(f, "Final 4:\n--------")?;
        if let Some(winner) = &self.winner {
            writeln!(f, "  {winner}")?;
        }
        Ok(())
    }
}
