//! The 52-card deck.

use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::{DeckError, RandomError};
use crate::random::{RandomSource, validate_permutation};

/// A complete deck: every rank and suit combination exactly once.
///
/// The first card of [`cards`](Self::cards) is the first one dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates an unshuffled deck, Clubs through Spades, Ace through King
    /// within each suit.
    ///
    /// ```
    /// use patience::{Card, Deck, Rank, Suit};
    ///
    /// let deck = Deck::fresh();
    /// assert_eq!(deck.cards()[0], Card::new(Rank::Ace, Suit::Clubs));
    /// assert_eq!(deck.cards()[51], Card::new(Rank::King, Suit::Spades));
    /// ```
    #[must_use]
    pub fn fresh() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Creates a fresh deck shuffled by `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails.
    pub fn shuffled<R: RandomSource + ?Sized>(source: &mut R) -> Result<Self, RandomError> {
        let mut deck = Self::fresh();
        deck.shuffle(source)?;
        Ok(deck)
    }

    /// Builds a deck from explicit cards, for stacked deals.
    ///
    /// # Errors
    ///
    /// Returns an error unless `cards` holds all 52 cards exactly once.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        check_complete(cards.iter().copied())?;
        Ok(Self { cards })
    }

    /// Reorders the deck with a permutation drawn from `source`.
    ///
    /// The deck is unchanged if the source fails or returns something other
    /// than a permutation.
    ///
    /// # Errors
    ///
    /// Returns the source's error, or [`RandomError::BadPermutation`].
    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, source: &mut R) -> Result<(), RandomError> {
        let perm = source.permutation(self.cards.len())?;
        validate_permutation(&perm, self.cards.len())?;
        self.cards = perm.into_iter().map(|index| self.cards[index]).collect();
        Ok(())
    }

    /// Returns the cards in dealing order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty. A valid deck never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Consumes the deck, returning the cards in dealing order.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Checks that `cards` is exactly the 52 distinct cards.
pub(crate) fn check_complete(cards: impl IntoIterator<Item = Card>) -> Result<(), DeckError> {
    let mut seen = HashSet::with_capacity(DECK_SIZE);
    for card in cards {
        if !seen.insert(card) {
            return Err(DeckError::Duplicate(card));
        }
    }
    if seen.len() == DECK_SIZE {
        Ok(())
    } else {
        Err(DeckError::WrongSize(seen.len()))
    }
}
