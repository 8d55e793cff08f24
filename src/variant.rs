//! The contract shared by every patience variant.

use crate::card::Suit;
use crate::error::{DealError, MoveError};
use crate::random::RandomSource;

/// Returns whether `suit` is black.
///
/// Suit color matters in most patience games, not only the suit itself.
#[must_use]
pub const fn is_black(suit: Suit) -> bool {
    !suit.is_red()
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The game was won.
    Won,
    /// The player stopped before winning.
    Quit,
}

/// A patience game that can be played one round at a time.
pub trait Variant: Sized {
    /// A single player move.
    type Move;

    /// Returns the display name of the variant.
    fn name(&self) -> &'static str;

    /// Deals a fresh game from `source`, then asks `player` for moves until
    /// the game is won or the player quits.
    ///
    /// Rejected moves are reported to the player and the round continues.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck cannot be shuffled.
    fn play_round<P: Player<Self>>(
        &mut self,
        player: &mut P,
        source: &mut dyn RandomSource,
    ) -> Result<RoundOutcome, DealError>;
}

/// Whoever chooses the moves: a person behind a front end, a bot, or a
/// test script.
pub trait Player<V: Variant> {
    /// Returns the player's name.
    fn name(&self) -> &str;

    /// Chooses the next move, or `None` to quit the round.
    fn choose_move(&mut self, game: &V) -> Option<V::Move>;

    /// Called when a chosen move was rejected. The game is unchanged.
    fn move_rejected(&mut self, _mv: &V::Move, _err: &MoveError) {}
}
