use crate::error::{BracketError, BracketResult};
use crate::game::Game;
use crate::picker::Picker;
use crate::team::Team;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks the favorite, except that each game independently goes to the
/// underdog with probability `p`.
///
/// The random stream belongs to the picker, so independent pickers can run on
/// separate threads without sharing state.
#[derive(Debug, Clone)]
pub struct UpsetProbability<R = ChaCha8Rng> {
    p: f64,
    rng: R,
}

impl UpsetProbability<ChaCha8Rng> {
    /// Seeded from OS entropy; runs are not reproducible.
    pub fn new(p: f64) -> BracketResult<Self> {
        Self::with_rng(p, ChaCha8Rng::from_os_rng())
    }

    /// Same `p` and `seed` always produce the same picks.
    pub fn seeded(p: f64, seed: u64) -> BracketResult<Self> {
        Self::with_rng(p, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> UpsetProbability<R> {
    pub fn with_rng(p: f64, rng: R) -> BracketResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(BracketError::invalid(format!(
                "upset probability must be between 0.0 and 1.0, got {p}"
            )));
        }
        Ok(Self { p, rng })
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl<R: Rng> Picker for UpsetProbability<R> {
    fn pick(&mut self, game: &Game) -> Team {
        let is_upset = self.rng.random_bool(self.p);
        if is_upset {
            game.underdog().clone()
        } else {
            game.favorite().clone()
        }
    }
}
