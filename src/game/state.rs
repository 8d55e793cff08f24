//! Game state and move types.

use crate::card::Suit;

/// Game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Created but not dealt yet.
    Setup,
    /// Dealt and waiting for the next move.
    AwaitingMove,
    /// Every foundation is complete. No further moves are accepted.
    Won,
}

/// A pile a card can be played from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Top card of a tableau column.
    Tableau(usize),
    /// Top card of the talon.
    Talon,
}

/// A single player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Turn stock cards onto the talon, or recycle the talon.
    Draw,
    /// Move the top `count` cards of one column onto another.
    TableauToTableau {
        /// Source column.
        from: usize,
        /// Destination column.
        to: usize,
        /// Number of cards moved.
        count: usize,
    },
    /// Play a top card to a foundation.
    ToFoundation {
        /// Where the card comes from.
        from: Source,
        /// Foundation to build on.
        suit: Suit,
    },
    /// Move the talon's top card onto a column.
    TalonToTableau {
        /// Destination column.
        to: usize,
    },
    /// Move a foundation's top card back onto a column.
    FoundationToTableau {
        /// Foundation to take from.
        suit: Suit,
        /// Destination column.
        to: usize,
    },
}
