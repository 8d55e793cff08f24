//! Klondike engine and state management.

use alloc::vec::Vec;

use crate::card::{Card, FOUNDATION_SIZE, Suit};
use crate::deck::{Deck, check_complete};
use crate::error::{DealError, DeckError};
use crate::options::KlondikeOptions;
use crate::pile::Pile;
use crate::random::RandomSource;
use crate::variant::{Player, RoundOutcome, Variant};

mod draw;
mod layout;
mod moves;
pub mod state;

pub use layout::{Column, Layout};
pub use state::{GameState, Move, Source};

/// Number of tableau columns.
pub const TABLEAU_COLUMNS: usize = 7;

/// Number of cards dealt to the tableau.
pub const TABLEAU_DEAL: usize = TABLEAU_COLUMNS * (TABLEAU_COLUMNS + 1) / 2;

/// A Klondike game.
///
/// The game owns every pile. Piles are only changed by the move methods,
/// and each move either applies completely or returns an error and leaves
/// the game as it was.
///
/// ```
/// use patience::{GameState, Klondike, KlondikeOptions, SeededSource};
///
/// let mut game = Klondike::new(KlondikeOptions::default());
/// let state = game.deal_from(&mut SeededSource::new(42)).unwrap();
/// assert_eq!(state, GameState::AwaitingMove);
/// assert_eq!(game.stock().len(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Klondike {
    options: KlondikeOptions,
    state: GameState,
    /// Face-down draw pile.
    stock: Pile,
    /// Face-up cards drawn from the stock.
    talon: Pile,
    /// One pile per suit, indexed by suit ordinal.
    foundations: [Pile; 4],
    tableau: [Pile; TABLEAU_COLUMNS],
    redeals: u32,
}

impl Klondike {
    /// Creates an undealt game.
    #[must_use]
    pub fn new(options: KlondikeOptions) -> Self {
        Self {
            options,
            state: GameState::Setup,
            stock: Pile::new(),
            talon: Pile::new(),
            foundations: Default::default(),
            tableau: Default::default(),
            redeals: 0,
        }
    }

    /// Deals `deck` front to back.
    ///
    /// Column `c` receives `c + 1` cards with only the last face-up; the
    /// remaining 24 cards become the stock, with the next deck card on top.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::AlreadyDealt`] unless the game is in
    /// [`GameState::Setup`].
    pub fn deal(&mut self, deck: Deck) -> Result<GameState, DealError> {
        if self.state != GameState::Setup {
            return Err(DealError::AlreadyDealt);
        }

        let mut cards = deck.into_cards().into_iter();
        for (column, pile) in self.tableau.iter_mut().enumerate() {
            let dealt: Vec<Card> = cards.by_ref().take(column + 1).collect();
            *pile = Pile::from_cards(dealt, column);
        }

        let mut stock: Vec<Card> = cards.collect();
        stock.reverse();
        let face_down = stock.len();
        self.stock = Pile::from_cards(stock, face_down);

        self.state = GameState::AwaitingMove;
        log::debug!(
            "dealt {TABLEAU_DEAL} cards to the tableau and {} to the stock",
            self.stock.len()
        );
        Ok(self.state)
    }

    /// Shuffles a fresh deck with `source` and deals it.
    ///
    /// # Errors
    ///
    /// Returns an error if the game was already dealt or the source fails.
    pub fn deal_from<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<GameState, DealError> {
        if self.state != GameState::Setup {
            return Err(DealError::AlreadyDealt);
        }
        let deck = Deck::shuffled(source)?;
        self.deal(deck)
    }

    /// Returns the current game state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns whether every foundation is complete.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.state == GameState::Won
    }

    /// Returns the game options.
    #[must_use]
    pub const fn options(&self) -> &KlondikeOptions {
        &self.options
    }

    /// Returns the stock.
    #[must_use]
    pub const fn stock(&self) -> &Pile {
        &self.stock
    }

    /// Returns the talon.
    #[must_use]
    pub const fn talon(&self) -> &Pile {
        &self.talon
    }

    /// Returns the foundation for `suit`.
    #[must_use]
    pub const fn foundation(&self, suit: Suit) -> &Pile {
        &self.foundations[suit.ordinal() as usize]
    }

    /// Returns a tableau column, or `None` for an index outside 0..7.
    #[must_use]
    pub fn tableau(&self, column: usize) -> Option<&Pile> {
        self.tableau.get(column)
    }

    /// Returns the number of times the talon has been recycled.
    #[must_use]
    pub const fn redeals(&self) -> u32 {
        self.redeals
    }

    /// Returns every card in play, pile by pile.
    pub fn census(&self) -> impl Iterator<Item = Card> + '_ {
        self.piles().flat_map(|pile| pile.cards().iter().copied())
    }

    /// Checks that the piles hold exactly the 52 distinct cards.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate found, or the number of distinct cards.
    pub fn verify_closure(&self) -> Result<(), DeckError> {
        check_complete(self.census())
    }

    fn piles(&self) -> impl Iterator<Item = &Pile> {
        [&self.stock, &self.talon]
            .into_iter()
            .chain(self.foundations.iter())
            .chain(self.tableau.iter())
    }

    fn foundations_complete(&self) -> bool {
        self.foundations
            .iter()
            .all(|pile| pile.len() == FOUNDATION_SIZE)
    }

    fn refresh_won(&mut self) {
        if self.state == GameState::AwaitingMove && self.foundations_complete() {
            self.state = GameState::Won;
            log::info!("klondike won after {} redeals", self.redeals);
        }
    }
}

impl Variant for Klondike {
    type Move = Move;

    fn name(&self) -> &'static str {
        "Klondike"
    }

    fn play_round<P: Player<Self>>(
        &mut self,
        player: &mut P,
        source: &mut dyn RandomSource,
    ) -> Result<RoundOutcome, DealError> {
        *self = Self::new(self.options);
        self.deal_from(source)?;
        log::debug!("{} starts a round of {}", player.name(), self.name());

        while !self.is_won() {
            let Some(mv) = player.choose_move(self) else {
                return Ok(RoundOutcome::Quit);
            };
            if let Err(err) = self.apply(mv) {
                log::trace!("rejected {mv:?}: {err}");
                player.move_rejected(&mv, &err);
            }
        }
        Ok(RoundOutcome::Won)
    }
}
