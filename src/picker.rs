use crate::game::Game;
use crate::team::Team;

/// Decides the winner of a game.
///
/// The returned team must be one of the game's two teams; the engine rejects
/// any other pick with `InvalidArgument` before the round is applied.
/// Closures `FnMut(&Game) -> Team` implement this directly.
pub trait Picker {
    fn pick(&mut self, game: &Game) -> Team;
}

impl<F> Picker for F
where
    F: FnMut(&Game) -> Team,
{
    fn pick(&mut self, game: &Game) -> Team {
        self(game)
    }
}
