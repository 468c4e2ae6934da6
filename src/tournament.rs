use crate::error::{BracketError, BracketResult};
use crate::finals::FinalsBracket;
use crate::picker::Picker;
use crate::region::RegionalBracket;
use crate::scoring::Scorecard;
use crate::team::Team;
use bracket_data::{Dataset, HistoricalResult, Region, RoundKind, SUPPORTED_YEARS};
use log::{Level, debug, info, log};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A full 64-team bracket for one tournament year.
///
/// Rounds are played strictly in order. `teams_in(round)` is non-empty exactly
/// when `round` has been reached: the first round is seeded at construction,
/// and playing a round fills the list for the next one. Playing a round again
/// throws away everything after it.
#[derive(Debug, Clone)]
pub struct Tournament {
    year: u16,
    regions: [RegionalBracket; 4],
    finals: FinalsBracket,
    rounds: [Vec<Team>; 6],
    winner: Option<Team>,
    result: Option<HistoricalResult>,
    scorecard: Option<Scorecard>,
}

impl Tournament {
    /// Seed all four regions from the dataset's field for `year`.
    pub fn new(dataset: &Dataset, year: u16) -> BracketResult<Self> {
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(BracketError::invalid(format!(
                "year {year} is outside the supported range {}-{}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            )));
        }
        let Some(record) = dataset.get(year) else {
            return Err(BracketError::NotFound(format!("no bracket recorded for {year}")));
        };

        let mut regions = Region::ALL.map(RegionalBracket::new);
        for bracket in &mut regions {
            let mut field: Vec<Team> = record
                .entrants(bracket.region())
                .iter()
                .map(Team::from)
                .collect();
            field.sort_by_key(Team::seed);
            bracket.initialize_first_round(field)?;
        }

        let mut tournament = Self {
            year,
            regions,
            finals: FinalsBracket::new(year, record.finals),
            rounds: Default::default(),
            winner: None,
            result: record.results.clone(),
            scorecard: None,
        };
        tournament.rounds[0] = tournament.first_round_teams();
        info!(
            "{year} bracket seeded with {} teams",
            tournament.rounds[0].len()
        );
        Ok(tournament)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn region(&self, region: Region) -> &RegionalBracket {
        &self.regions[region as usize]
    }

    /// Regions in East, West, Midwest, South order.
    pub fn regions(&self) -> &[RegionalBracket; 4] {
        &self.regions
    }

    pub fn finals(&self) -> &FinalsBracket {
        &self.finals
    }

    /// Teams that reached `round`, in region order and bracket order within
    /// each region. Empty until the round before it has been played.
    pub fn teams_in(&self, round: RoundKind) -> &[Team] {
        &self.rounds[round.index()]
    }

    pub fn winner(&self) -> Option<&Team> {
        self.winner.as_ref()
    }

    /// What actually happened this year, if it is recorded.
    pub fn result(&self) -> Option<&HistoricalResult> {
        self.result.as_ref()
    }

    pub fn scorecard(&self) -> Option<&Scorecard> {
        self.scorecard.as_ref()
    }

    /// Correct picks from the last `score`, or zero.
    pub fn games_correct(&self) -> u32 {
        self.scorecard.as_ref().map_or(0, |card| card.games_correct)
    }

    /// Points from the last `score`, or zero.
    pub fn total_score(&self) -> u32 {
        self.scorecard.as_ref().map_or(0, |card| card.total_score)
    }

    /// Play every game of `round` and return the teams that advance out of it.
    ///
    /// The whole round is decided before anything is stored, so a rejected
    /// pick leaves the bracket exactly as it was.
    pub fn run_round(&mut self, round: RoundKind, picker: &mut dyn Picker) -> BracketResult<&[Team]> {
        if self.rounds[round.index()].is_empty() {
            let before = round.prev().map_or_else(String::new, |prev| format!(" after {prev}"));
            return Err(BracketError::precondition(format!(
                "{round} can only be played{before}"
            )));
        }

        let mut advanced = match round {
            RoundKind::First | RoundKind::Second | RoundKind::Sweet16 => {
                self.advance_regions(round, picker)?
            }
            RoundKind::Elite8 => self.advance_regional_finals(picker)?,
            RoundKind::FinalFour => {
                let championship = self.finals.run_semifinals(picker)?;
                championship.teams().map(Team::clone).to_vec()
            }
            RoundKind::Championship => vec![self.finals.run_championship(picker)?.clone()],
        };

        let idx = round.index();
        for later in &mut self.rounds[idx + 1..] {
            later.clear();
        }
        if round < RoundKind::Elite8 {
            self.finals.reset();
        }
        self.winner = None;
        self.scorecard = None;
        debug!("{} {round}: {} teams advance", self.year, advanced.len());

        match round.next() {
            Some(next) => {
                self.rounds[next.index()] = advanced;
                Ok(&self.rounds[next.index()])
            }
            None => {
                let Some(champion) = advanced.pop() else {
                    return Err(BracketError::precondition("the championship produced no winner"));
                };
                info!("{} champion: {champion}", self.year);
                Ok(std::slice::from_ref(self.winner.insert(champion)))
            }
        }
    }

    pub fn run_first_round(&mut self, picker: &mut dyn Picker) -> BracketResult<&[Team]> {
        self.run_round(RoundKind::First, picker)
    }

    pub fn run_second_round(&mut self, picker: &mut dyn Picker) -> BracketResult<&[Team]> {
        self.run_round(RoundKind::Second, picker)
    }

    pub fn run_sweet_sixteen(&mut self, picker: &mut dyn Picker) -> BracketResult<&[Team]> {
        self.run_round(RoundKind::Sweet16, picker)
    }

    /// Decide the four regional finals and set up the national semifinals.
    pub fn run_elite_eight(&mut self, picker: &mut dyn Picker) -> BracketResult<&[Team]> {
        self.run_round(RoundKind::Elite8, picker)
    }

    pub fn run_final_four(&mut self, picker: &mut dyn Picker) -> BracketResult<&[Team]> {
        self.run_round(RoundKind::FinalFour, picker)
    }

    pub fn run_championship(&mut self, picker: &mut dyn Picker) -> BracketResult<&Team> {
        self.run_round(RoundKind::Championship, picker)?;
        self.winner
            .as_ref()
            .ok_or_else(|| BracketError::precondition("the championship produced no winner"))
    }

    /// Play all six rounds from the first, replacing any earlier run.
    pub fn simulate(&mut self, picker: &mut dyn Picker) -> BracketResult<&Team> {
        for round in RoundKind::ALL {
            self.run_round(round, picker)?;
        }
        self.winner
            .as_ref()
            .ok_or_else(|| BracketError::precondition("the championship produced no winner"))
    }

    /// Compare the simulated bracket with the recorded results.
    ///
    /// With a picker, the whole tournament is simulated first; without one, a
    /// previous run must have crowned a champion. `verbose` reports the score
    /// at info level instead of debug.
    pub fn score(&mut self, picker: Option<&mut dyn Picker>, verbose: bool) -> BracketResult<Scorecard> {
        if self.result.is_none() {
            return Err(BracketError::precondition(format!(
                "no recorded results for {} to score against",
                self.year
            )));
        }
        if let Some(picker) = picker {
            self.simulate(picker)?;
        }
        let (Some(champion), Some(result)) = (&self.winner, &self.result) else {
            return Err(BracketError::precondition(
                "the tournament must be simulated before it is scored",
            ));
        };

        let rounds = &self.rounds;
        let card = Scorecard::tally(move |round| rounds[round.index()].as_slice(), champion, result);

        let level = if verbose { Level::Info } else { Level::Debug };
        log!(level, "{} bracket scored:\n{card}", self.year);
        for (round, correct) in RoundKind::ALL[1..].iter().map(|r| (r, card.correct_in(*r))) {
            log!(level, "  {round}: {correct} correct");
        }

        Ok(self.scorecard.insert(card).clone())
    }

    /// Back to the seeded first round, keeping any team stats.
    pub fn reset(&mut self) {
        for bracket in &mut self.regions {
            bracket.reset();
        }
        self.finals.reset();
        for later in &mut self.rounds[1..] {
            later.clear();
        }
        self.winner = None;
        self.scorecard = None;
    }

    /// Set a stat on the named team wherever it appears in the bracket.
    pub fn set_team_stat(&mut self, name: &str, key: &str, value: Value) -> BracketResult<()> {
        let mut found = false;
        for bracket in &mut self.regions {
            found |= bracket.set_team_stat(name, key, value.clone());
        }
        if !found {
            return Err(BracketError::NotFound(format!(
                "no team named {name:?} in the {} bracket",
                self.year
            )));
        }

        self.finals.set_team_stat(name, key, &value);
        let copies = self
            .rounds
            .iter_mut()
            .flatten()
            .chain(self.winner.iter_mut());
        for team in copies.filter(|t| t.name() == name) {
            team.stats.insert(key.to_owned(), value.clone());
        }
        Ok(())
    }

    fn first_round_teams(&self) -> Vec<Team> {
        self.regions
            .iter()
            .flat_map(|bracket| bracket.games(RoundKind::First))
            .flat_map(|game| game.teams().map(Team::clone))
            .collect()
    }

    /// Play `round` in every region; nothing is stored unless all four succeed.
    fn advance_regions(&mut self, round: RoundKind, picker: &mut dyn Picker) -> BracketResult<Vec<Team>> {
        let Some(next) = round.next() else {
            return Err(BracketError::invalid(format!("{round} is not a regional round")));
        };
        let mut planned = Vec::with_capacity(self.regions.len());
        for bracket in &self.regions {
            planned.push(bracket.plan_round(next, picker)?);
        }

        let mut advanced = Vec::new();
        for (bracket, games) in self.regions.iter_mut().zip(planned) {
            let games = bracket.commit_round(next, games);
            advanced.extend(games.iter().flat_map(|game| game.teams().map(Team::clone)));
        }
        Ok(advanced)
    }

    /// Decide each regional final and pair the winners for the semifinals.
    fn advance_regional_finals(&mut self, picker: &mut dyn Picker) -> BracketResult<Vec<Team>> {
        let mut winners = Vec::with_capacity(self.regions.len());
        for bracket in &self.regions {
            winners.push(bracket.plan_winner(picker)?);
        }
        let by_region: HashMap<Region, Team> = self
            .regions
            .iter()
            .map(RegionalBracket::region)
            .zip(winners.iter().cloned())
            .collect();
        let semifinals = self.finals.plan_matches(&by_region)?;

        for (bracket, winner) in self.regions.iter_mut().zip(winners.iter().cloned()) {
            bracket.set_winner(winner);
        }
        self.finals.commit_matches(semifinals);
        Ok(winners)
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bracket for year {}", self.year)?;
        write!(f, "{}", self.finals)?;
        for bracket in &self.regions {
            write!(f, "\n{bracket}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::scoring::{CHAMPION_POINTS, MAX_GAMES_CORRECT, MAX_TOTAL_SCORE};
    use crate::simulators::UpsetProbability;
    use crate::test_support::{chalk_dataset, chalk_record, favorite};

    fn chalk(year: u16) -> Tournament {
        Tournament::new(&chalk_dataset(year), year).unwrap()
    }

    #[test]
    fn years_outside_the_range_are_invalid() {
        for year in [1984, 2020] {
            let err = Tournament::new(&chalk_dataset(year), year).unwrap_err();
            assert!(matches!(err, BracketError::InvalidArgument(_)), "{year}: {err}");
        }
    }

    #[test]
    fn missing_year_is_not_found() {
        let err = Tournament::new(&chalk_dataset(2001), 2002).unwrap_err();
        assert!(matches!(err, BracketError::NotFound(_)), "{err}");
    }

    #[test]
    fn short_region_is_invalid() {
        let mut record = chalk_record(2010);
        if let Some(field) = record.regions.get_mut(&Region::West) {
            field.pop();
        }
        let dataset: Dataset = std::iter::once(record).collect();
        let err = Tournament::new(&dataset, 2010).unwrap_err();
        assert!(matches!(err, BracketError::InvalidArgument(_)), "{err}");
    }

    #[test]
    fn field_order_in_the_dataset_does_not_matter() {
        let mut record = chalk_record(2010);
        if let Some(field) = record.regions.get_mut(&Region::South) {
            field.reverse();
        }
        let dataset: Dataset = std::iter::once(record).collect();
        let tournament = Tournament::new(&dataset, 2010).unwrap();
        let first = &tournament.region(Region::South).games(RoundKind::First)[0];
        assert_eq!((first.top().seed(), first.bottom().seed()), (1, 16));
    }

    #[test]
    fn only_the_first_round_is_seeded() {
        let tournament = chalk(2015);
        assert_eq!(tournament.teams_in(RoundKind::First).len(), 64);
        for round in &RoundKind::ALL[1..] {
            assert!(tournament.teams_in(*round).is_empty(), "{round}");
        }
        assert_eq!(tournament.teams_in(RoundKind::First)[0].name(), "East 1");
        assert_eq!(tournament.teams_in(RoundKind::First)[16].name(), "West 1");
    }

    #[test]
    fn rounds_must_be_played_in_order() {
        let mut tournament = chalk(2015);
        for round in &RoundKind::ALL[1..] {
            let err = tournament.run_round(*round, &mut favorite).unwrap_err();
            assert!(matches!(err, BracketError::FailedPrecondition(_)), "{round}: {err}");
        }
        let err = tournament.score(None, false).unwrap_err();
        assert!(matches!(err, BracketError::FailedPrecondition(_)), "{err}");
    }

    #[test]
    fn each_round_halves_the_field() {
        let mut tournament = chalk(2015);
        assert_eq!(tournament.run_first_round(&mut favorite).unwrap().len(), 32);
        assert_eq!(tournament.run_second_round(&mut favorite).unwrap().len(), 16);
        assert_eq!(tournament.run_sweet_sixteen(&mut favorite).unwrap().len(), 8);
        assert_eq!(tournament.run_elite_eight(&mut favorite).unwrap().len(), 4);
        assert_eq!(tournament.run_final_four(&mut favorite).unwrap().len(), 2);
        assert_eq!(tournament.run_championship(&mut favorite).unwrap().name(), "East 1");
    }

    #[test]
    fn regional_winners_are_listed_in_region_order() {
        let mut tournament = chalk(2015);
        tournament.simulate(&mut favorite).unwrap();
        let final_four: Vec<&str> = tournament
            .teams_in(RoundKind::FinalFour)
            .iter()
            .map(Team::name)
            .collect();
        assert_eq!(final_four, ["East 1", "West 1", "Midwest 1", "South 1"]);
        assert_eq!(tournament.finals().semifinals()[0].bottom().name(), "Midwest 1");
    }

    #[test]
    fn chalk_bracket_scores_perfectly() {
        let mut tournament = chalk(2015);
        let card = tournament.score(Some(&mut favorite), true).unwrap();
        assert_eq!(card.games_correct, MAX_GAMES_CORRECT);
        assert_eq!(card.total_score, MAX_TOTAL_SCORE);
        assert!(card.champion_correct);
        assert_eq!(tournament.games_correct(), MAX_GAMES_CORRECT);
        assert_eq!(tournament.total_score(), MAX_TOTAL_SCORE);

        let again = tournament.score(None, false).unwrap();
        assert_eq!(again, card);
    }

    #[test]
    fn picking_the_real_champion_earns_the_championship_points() {
        let mut record = chalk_record(2019);
        record.results = Some(HistoricalResult {
            winner: "West 1".into(),
            ..Default::default()
        });
        let dataset: Dataset = std::iter::once(record).collect();
        let mut tournament = Tournament::new(&dataset, 2019).unwrap();

        let mut backs_west = |g: &Game| {
            if g.round() == RoundKind::Championship {
                g.teams()
                    .into_iter()
                    .find(|t| t.name() == "West 1")
                    .unwrap_or(g.favorite())
                    .clone()
            } else {
                g.favorite().clone()
            }
        };
        let card = tournament.score(Some(&mut backs_west), false).unwrap();
        assert!(card.champion_correct);
        assert_eq!(card.total_score, CHAMPION_POINTS);
        assert_eq!(card.games_correct, 1);
    }

    #[test]
    fn scores_stay_in_bounds() {
        let mut tournament = chalk(2008);
        for seed in 0..200 {
            let mut picker = UpsetProbability::seeded(0.3, seed).unwrap();
            let card = tournament.score(Some(&mut picker), false).unwrap();
            assert!(card.games_correct <= MAX_GAMES_CORRECT, "seed {seed}");
            assert!(card.total_score <= MAX_TOTAL_SCORE, "seed {seed}");

            let champion = tournament.winner().unwrap();
            assert!(tournament.teams_in(RoundKind::First).contains(champion));
        }
    }

    #[test]
    fn missing_results_cannot_be_scored() {
        let mut record = chalk_record(2019);
        record.results = None;
        let dataset: Dataset = std::iter::once(record).collect();
        let mut tournament = Tournament::new(&dataset, 2019).unwrap();
        let err = tournament.score(Some(&mut favorite), false).unwrap_err();
        assert!(matches!(err, BracketError::FailedPrecondition(_)), "{err}");
        assert!(tournament.winner().is_none());
    }

    #[test]
    fn missing_pairings_stop_at_the_elite_eight() {
        let mut record = chalk_record(1990);
        record.finals = None;
        let dataset: Dataset = std::iter::once(record).collect();
        let mut tournament = Tournament::new(&dataset, 1990).unwrap();
        tournament.run_first_round(&mut favorite).unwrap();
        tournament.run_second_round(&mut favorite).unwrap();
        tournament.run_sweet_sixteen(&mut favorite).unwrap();

        let err = tournament.run_elite_eight(&mut favorite).unwrap_err();
        assert!(matches!(err, BracketError::FailedPrecondition(_)), "{err}");
        assert!(tournament.teams_in(RoundKind::FinalFour).is_empty());
        assert!(tournament.regions().iter().all(|r| r.winner().is_none()));
    }

    #[test]
    fn rejected_pick_leaves_the_round_unplayed() {
        let mut tournament = chalk(2015);
        let mut calls = 0;
        let mut flaky = |g: &Game| {
            calls += 1;
            if calls == 20 { Team::new("Ghost", 1) } else { g.favorite().clone() }
        };
        let err = tournament.run_first_round(&mut flaky).unwrap_err();
        assert!(matches!(err, BracketError::InvalidArgument(_)), "{err}");
        assert!(tournament.teams_in(RoundKind::Second).is_empty());
        assert!(
            tournament
                .regions()
                .iter()
                .all(|r| r.games(RoundKind::Second).is_empty())
        );
    }

    #[test]
    fn replaying_a_round_clears_what_followed() {
        let mut tournament = chalk(2015);
        tournament.score(Some(&mut favorite), false).unwrap();

        tournament.run_second_round(&mut favorite).unwrap();
        assert_eq!(tournament.teams_in(RoundKind::Sweet16).len(), 16);
        assert!(tournament.teams_in(RoundKind::Elite8).is_empty());
        assert!(tournament.winner().is_none());
        assert!(tournament.scorecard().is_none());
        assert!(tournament.finals().semifinals().is_empty());
        assert_eq!(tournament.total_score(), 0);
    }

    #[test]
    fn reset_returns_to_the_seeded_field() {
        let mut tournament = chalk(2015);
        tournament.simulate(&mut favorite).unwrap();
        tournament.reset();
        assert_eq!(tournament.teams_in(RoundKind::First).len(), 64);
        assert!(tournament.teams_in(RoundKind::Second).is_empty());
        assert!(tournament.region(Region::East).games(RoundKind::Second).is_empty());
        assert!(tournament.finals().winner().is_none());
        assert!(tournament.winner().is_none());
        assert_eq!(tournament.simulate(&mut favorite).unwrap().name(), "East 1");
    }

    #[test]
    fn stats_follow_a_team_through_the_bracket() {
        let mut tournament = chalk(2015);
        tournament.simulate(&mut favorite).unwrap();
        tournament
            .set_team_stat("East 1", "adj_em", serde_json::json!(30.1))
            .unwrap();

        assert_eq!(tournament.winner().unwrap().stat_f64("adj_em"), Some(30.1));
        assert_eq!(
            tournament.teams_in(RoundKind::Elite8)[0].stat_f64("adj_em"),
            Some(30.1)
        );
        let semifinal = &tournament.finals().semifinals()[0];
        assert_eq!(semifinal.top().stat_f64("adj_em"), Some(30.1));

        let err = tournament
            .set_team_stat("Nobody", "adj_em", serde_json::json!(0))
            .unwrap_err();
        assert!(matches!(err, BracketError::NotFound(_)), "{err}");
    }

    #[test]
    fn renders_every_part_of_the_bracket() {
        let mut tournament = chalk(2015);
        tournament.simulate(&mut favorite).unwrap();
        let text = tournament.to_string();
        assert!(text.starts_with("Bracket for year 2015\nWinner:\n"), "{text}");
        for region in Region::ALL {
            assert!(text.contains(&format!("{region} Region\n")), "{region}");
        }
    }
}
