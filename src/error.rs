//! Error types for engine operations.

use alloc::string::String;
use core::time::Duration;

use thiserror::Error;

use crate::card::{Card, Suit};

/// Errors that can occur when accessing or mutating a pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PileError {
    /// The pile has no cards.
    #[error("pile is empty")]
    Empty,
    /// More cards were requested than the pile holds.
    #[error("requested {requested} cards but the pile holds {available}")]
    NotEnoughCards {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards in the pile.
        available: usize,
    },
    /// A run of zero cards was requested.
    #[error("run length must be positive")]
    ZeroCount,
    /// A face-down card was pushed onto a face-up card.
    #[error("cannot place a face-down card on a face-up card")]
    FaceDownOnFaceUp,
}

/// Errors that can occur when building a deck from explicit cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The deck does not hold exactly 52 cards.
    #[error("deck holds {0} cards, expected 52")]
    WrongSize(usize),
    /// A card appears more than once.
    #[error("duplicate card: {0}")]
    Duplicate(Card),
}

/// Errors produced by a random source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// The operating system entropy source is unavailable.
    #[error("operating system entropy unavailable: {0}")]
    Entropy(String),
    /// The remote randomness service failed.
    #[error("randomness service failed: {0}")]
    Service(String),
    /// The remote randomness service did not answer in time.
    #[error("randomness service timed out after {0:?}")]
    Timeout(Duration),
    /// A source returned something that is not a permutation.
    #[error("source returned an invalid permutation of {0} items")]
    BadPermutation(usize),
    /// Both the primary and the fallback source failed.
    #[error("no random source available: {0}")]
    Exhausted(String),
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    /// The game has already been dealt.
    #[error("game has already been dealt")]
    AlreadyDealt,
    /// The deck could not be shuffled.
    #[error(transparent)]
    Random(#[from] RandomError),
}

/// Errors that can occur when drawing from the stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The game has not been dealt yet.
    #[error("game has not been dealt")]
    NotDealt,
    /// The game is already won.
    #[error("game is over")]
    GameOver,
    /// Stock and talon are both empty.
    #[error("stock and talon are both empty")]
    StockExhausted,
    /// The configured number of redeals has been used up.
    #[error("no redeals remaining")]
    RedealLimit,
}

/// Errors that can occur when moving cards.
///
/// `InvalidColumn`, `SameColumn` and `ZeroCount` reject malformed requests;
/// the remaining variants reject well-formed moves that break the rules.
/// Every error leaves the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The game has not been dealt yet.
    #[error("game has not been dealt")]
    NotDealt,
    /// The game is already won.
    #[error("game is over")]
    GameOver,
    /// Column index outside 0..7.
    #[error("invalid tableau column: {0}")]
    InvalidColumn(usize),
    /// Source and destination are the same column.
    #[error("source and destination are the same column")]
    SameColumn,
    /// A move of zero cards was requested.
    #[error("move count must be positive")]
    ZeroCount,
    /// The source pile is empty or shorter than the requested run.
    #[error("source does not hold enough cards")]
    EmptySource,
    /// The moved run includes a face-down card.
    #[error("cannot move face-down cards")]
    FaceDown,
    /// The moved cards do not form a descending alternating-color run.
    #[error("cards do not form a valid run")]
    BrokenRun,
    /// The destination does not accept the card.
    #[error("illegal move")]
    Illegal,
    /// A draw was rejected.
    #[error(transparent)]
    Draw(#[from] DrawError),
}

/// Errors that can occur when building a game from an explicit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The piles do not hold exactly the 52 distinct cards.
    #[error(transparent)]
    Deck(#[from] DeckError),
    /// A foundation is not an ascending Ace-first run of its suit.
    #[error("foundation for {0} is not an ascending run of its suit")]
    Foundation(Suit),
    /// A tableau column has face-down cards above face-up ones, or its top is face-down.
    #[error("tableau column {0} has an invalid face-down boundary")]
    Tableau(usize),
}
