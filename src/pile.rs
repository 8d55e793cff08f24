//! Ordered card piles with a face-down boundary.

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::PileError;

/// An ordered pile of cards, bottom first.
///
/// Cards below `first_face_up` are face-down, the rest are face-up, so
/// face-down cards always form a contiguous prefix. Only the top of the pile
/// (or a run ending at the top) is ever handed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pile {
    cards: Vec<Card>,
    first_face_up: usize,
}

impl Pile {
    /// Creates an empty pile.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            first_face_up: 0,
        }
    }

    /// Creates a pile from cards listed bottom first, with the lowest
    /// `face_down` of them face-down.
    ///
    /// `face_down` is clamped to the number of cards.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>, face_down: usize) -> Self {
        let first_face_up = face_down.min(cards.len());
        Self {
            cards,
            first_face_up,
        }
    }

    /// Returns the cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the face-up cards, bottom first.
    #[must_use]
    pub fn face_up_cards(&self) -> &[Card] {
        &self.cards[self.first_face_up..]
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the index of the first face-up card.
    ///
    /// Equals [`len`](Self::len) when every card is face-down.
    #[must_use]
    pub const fn first_face_up(&self) -> usize {
        self.first_face_up
    }

    /// Returns the number of face-down cards.
    #[must_use]
    pub const fn face_down_count(&self) -> usize {
        self.first_face_up
    }

    /// Returns the number of face-up cards.
    #[must_use]
    pub fn face_up_count(&self) -> usize {
        self.cards.len() - self.first_face_up
    }

    /// Returns whether the card at `index` is face-up.
    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        index < self.cards.len() && index >= self.first_face_up
    }

    /// Returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`PileError::Empty`] if the pile has no cards.
    pub fn top_card(&self) -> Result<Card, PileError> {
        self.cards.last().copied().ok_or(PileError::Empty)
    }

    /// Places a card on top of the pile.
    ///
    /// # Errors
    ///
    /// Returns [`PileError::FaceDownOnFaceUp`] when pushing a face-down card
    /// onto a pile that already has face-up cards.
    pub fn push(&mut self, card: Card, face_up: bool) -> Result<(), PileError> {
        if !face_up {
            if self.face_up_count() > 0 {
                return Err(PileError::FaceDownOnFaceUp);
            }
            self.first_face_up += 1;
        }
        self.cards.push(card);
        Ok(())
    }

    /// Removes and returns the top card.
    ///
    /// Does not flip the newly exposed card; see [`reveal_if_needed`](Self::reveal_if_needed).
    ///
    /// # Errors
    ///
    /// Returns [`PileError::Empty`] if the pile has no cards.
    pub fn pop_top(&mut self) -> Result<Card, PileError> {
        let card = self.cards.pop().ok_or(PileError::Empty)?;
        self.first_face_up = self.first_face_up.min(self.cards.len());
        Ok(card)
    }

    /// Returns the top `n` cards without removing them, bottom first.
    ///
    /// # Errors
    ///
    /// Returns [`PileError::ZeroCount`] for `n == 0` and
    /// [`PileError::NotEnoughCards`] if the pile is shorter than `n`.
    pub fn take_top_run(&self, n: usize) -> Result<&[Card], PileError> {
        let start = self.run_start(n)?;
        Ok(&self.cards[start..])
    }

    /// Returns whether all of the top `n` cards are face-up.
    ///
    /// Returns `false` if the pile is shorter than `n`.
    #[must_use]
    pub fn top_run_face_up(&self, n: usize) -> bool {
        n <= self.face_up_count()
    }

    /// Removes the top `n` cards and returns them, bottom first.
    ///
    /// # Errors
    ///
    /// Same conditions as [`take_top_run`](Self::take_top_run); the pile is
    /// unchanged on error.
    pub fn remove_top_run(&mut self, n: usize) -> Result<Vec<Card>, PileError> {
        let start = self.run_start(n)?;
        let run = self.cards.split_off(start);
        self.first_face_up = self.first_face_up.min(self.cards.len());
        Ok(run)
    }

    /// Appends cards face-up, bottom first.
    pub fn extend_face_up(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Turns the top card face-up if every remaining card is face-down.
    ///
    /// Returns whether a card was flipped.
    pub fn reveal_if_needed(&mut self) -> bool {
        if !self.cards.is_empty() && self.first_face_up == self.cards.len() {
            self.first_face_up -= 1;
            true
        } else {
            false
        }
    }

    /// Removes every card, returning them bottom first.
    pub fn drain(&mut self) -> Vec<Card> {
        self.first_face_up = 0;
        core::mem::take(&mut self.cards)
    }

    fn run_start(&self, n: usize) -> Result<usize, PileError> {
        if n == 0 {
            return Err(PileError::ZeroCount);
        }
        self.cards
            .len()
            .checked_sub(n)
            .ok_or(PileError::NotEnoughCards {
                requested: n,
                available: self.cards.len(),
            })
    }
}
