//! Building games from explicit piles.

use alloc::vec::Vec;

use crate::card::{Card, Rank, Suit};
use crate::deck::check_complete;
use crate::error::LayoutError;
use crate::options::KlondikeOptions;
use crate::pile::Pile;

use super::moves::is_run;
use super::{GameState, Klondike, TABLEAU_COLUMNS};

/// A tableau column split at its face-down boundary. Both halves are
/// listed bottom first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    /// Face-down cards.
    pub face_down: Vec<Card>,
    /// Face-up cards.
    pub face_up: Vec<Card>,
}

/// Every pile of a Klondike game, bottom first.
///
/// The stock's last card is the next one drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Face-down draw pile.
    pub stock: Vec<Card>,
    /// Face-up drawn cards.
    pub talon: Vec<Card>,
    /// Foundations indexed by suit ordinal.
    pub foundations: [Vec<Card>; 4],
    /// Tableau columns.
    pub tableau: [Column; TABLEAU_COLUMNS],
}

impl Layout {
    fn validate(&self) -> Result<(), LayoutError> {
        let tableau = self
            .tableau
            .iter()
            .flat_map(|column| column.face_down.iter().chain(&column.face_up));
        let all = self
            .stock
            .iter()
            .chain(&self.talon)
            .chain(self.foundations.iter().flatten())
            .chain(tableau)
            .copied();
        check_complete(all)?;

        for (suit, foundation) in Suit::ALL.into_iter().zip(&self.foundations) {
            let ascending = foundation
                .iter()
                .zip(Rank::ALL)
                .all(|(&card, rank)| card == Card::new(rank, suit));
            if !ascending {
                return Err(LayoutError::Foundation(suit));
            }
        }

        for (index, column) in self.tableau.iter().enumerate() {
            let hidden_top = column.face_up.is_empty() && !column.face_down.is_empty();
            if hidden_top || !is_run(&column.face_up) {
                return Err(LayoutError::Tableau(index));
            }
        }
        Ok(())
    }
}

impl Klondike {
    /// Creates a game in the position described by `layout`.
    ///
    /// The game starts in [`GameState::Won`] if every foundation is
    /// complete and in [`GameState::AwaitingMove`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the piles do not hold the 52 distinct cards, a
    /// foundation is not an Ace-first run of its suit, or a tableau column
    /// has a face-down top card or a face-up part that is not a run.
    pub fn from_layout(options: KlondikeOptions, layout: Layout) -> Result<Self, LayoutError> {
        layout.validate()?;

        let Layout {
            stock,
            talon,
            foundations,
            tableau,
        } = layout;

        let face_down = stock.len();
        let mut game = Self::new(options);
        game.stock = Pile::from_cards(stock, face_down);
        game.talon = Pile::from_cards(talon, 0);
        game.foundations = foundations.map(|cards| Pile::from_cards(cards, 0));
        game.tableau = tableau.map(|Column { face_down, mut face_up }| {
            let hidden = face_down.len();
            let mut cards = face_down;
            cards.append(&mut face_up);
            Pile::from_cards(cards, hidden)
        });
        game.state = GameState::AwaitingMove;
        game.refresh_won();
        Ok(game)
    }

    /// Returns the current position as a [`Layout`].
    #[must_use]
    pub fn layout(&self) -> Layout {
        let split = |pile: &Pile| Column {
            face_down: pile.cards()[..pile.face_down_count()].to_vec(),
            face_up: pile.face_up_cards().to_vec(),
        };
        Layout {
            stock: self.stock.cards().to_vec(),
            talon: self.talon.cards().to_vec(),
            foundations: self.foundations.each_ref().map(|pile| pile.cards().to_vec()),
            tableau: self.tableau.each_ref().map(split),
        }
    }
}
