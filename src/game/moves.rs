use alloc::vec::Vec;

use crate::card::{Card, Rank, Suit};
use crate::error::MoveError;
use crate::pile::Pile;
use crate::variant::is_black;

use super::{GameState, Klondike, Move, Source, TABLEAU_COLUMNS};

/// `card` may sit directly on `below` in the tableau.
fn stacks_on(card: Card, below: Card) -> bool {
    below.is_one_above(card) && is_black(card.suit()) != is_black(below.suit())
}

/// Descending, alternating-color run, bottom first.
pub(super) fn is_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| stacks_on(pair[1], pair[0]))
}

fn tableau_accepts(column: &Pile, card: Card) -> bool {
    column
        .top_card()
        .map_or(card.rank() == Rank::King, |top| stacks_on(card, top))
}

fn foundation_accepts(foundation: &Pile, suit: Suit, card: Card) -> bool {
    if card.suit() != suit {
        return false;
    }
    foundation
        .top_card()
        .map_or(card.rank() == Rank::Ace, |top| card.is_one_above(top))
}

impl Klondike {
    fn ensure_playing(&self) -> Result<(), MoveError> {
        match self.state {
            GameState::Setup => Err(MoveError::NotDealt),
            GameState::Won => Err(MoveError::GameOver),
            GameState::AwaitingMove => Ok(()),
        }
    }

    fn column(&self, column: usize) -> Result<&Pile, MoveError> {
        self.tableau
            .get(column)
            .ok_or(MoveError::InvalidColumn(column))
    }

    fn source_pile(&self, source: Source) -> Result<&Pile, MoveError> {
        match source {
            Source::Tableau(column) => self.column(column),
            Source::Talon => Ok(&self.talon),
        }
    }

    /// Checks a tableau-to-tableau move without applying it.
    ///
    /// # Errors
    ///
    /// Returns why the move is rejected.
    pub fn check_tableau_move(
        &self,
        from: usize,
        to: usize,
        count: usize,
    ) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let source = self.column(from)?;
        let dest = self.column(to)?;
        if from == to {
            return Err(MoveError::SameColumn);
        }
        if count == 0 {
            return Err(MoveError::ZeroCount);
        }

        let run = source
            .take_top_run(count)
            .map_err(|_| MoveError::EmptySource)?;
        if !source.top_run_face_up(count) {
            return Err(MoveError::FaceDown);
        }
        if !is_run(run) {
            return Err(MoveError::BrokenRun);
        }
        if !tableau_accepts(dest, run[0]) {
            return Err(MoveError::Illegal);
        }
        Ok(())
    }

    /// Returns whether the top `count` cards of column `from` can move onto
    /// column `to`.
    ///
    /// The cards must all be face-up and form a descending alternating-color
    /// run. An empty destination takes only a run starting with a King;
    /// otherwise its top card must be one rank above and the opposite color
    /// of the run's first card.
    #[must_use]
    pub fn can_move_cards(&self, from: usize, to: usize, count: usize) -> bool {
        self.check_tableau_move(from, to, count).is_ok()
    }

    /// Moves the top `count` cards of column `from` onto column `to`,
    /// turning up the newly exposed card of `from` if needed.
    ///
    /// # Errors
    ///
    /// Returns why the move is rejected; the game is unchanged.
    pub fn move_tableau_to_tableau(
        &mut self,
        from: usize,
        to: usize,
        count: usize,
    ) -> Result<(), MoveError> {
        self.check_tableau_move(from, to, count)?;
        let run = self.tableau[from]
            .remove_top_run(count)
            .map_err(|_| MoveError::EmptySource)?;
        self.tableau[from].reveal_if_needed();
        self.tableau[to].extend_face_up(run);
        Ok(())
    }

    /// Checks a play to the foundation of `suit` without applying it.
    ///
    /// # Errors
    ///
    /// Returns why the play is rejected.
    pub fn check_foundation_play(&self, source: Source, suit: Suit) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let card = self
            .source_pile(source)?
            .top_card()
            .map_err(|_| MoveError::EmptySource)?;
        if !foundation_accepts(self.foundation(suit), suit, card) {
            return Err(MoveError::Illegal);
        }
        Ok(())
    }

    /// Returns whether the top card of `source` can be played to the
    /// foundation of `suit`: an Ace on an empty foundation, or the next rank
    /// of the same suit.
    #[must_use]
    pub fn can_play_to_foundation(&self, source: Source, suit: Suit) -> bool {
        self.check_foundation_play(source, suit).is_ok()
    }

    /// Plays the top card of `source` to the foundation of `suit`.
    ///
    /// Completing the last foundation wins the game.
    ///
    /// # Errors
    ///
    /// Returns why the play is rejected; the game is unchanged.
    pub fn play_to_foundation(&mut self, source: Source, suit: Suit) -> Result<(), MoveError> {
        self.check_foundation_play(source, suit)?;
        let card = match source {
            Source::Tableau(column) => {
                let card = self.tableau[column]
                    .pop_top()
                    .map_err(|_| MoveError::EmptySource)?;
                self.tableau[column].reveal_if_needed();
                card
            }
            Source::Talon => self.talon.pop_top().map_err(|_| MoveError::EmptySource)?,
        };
        self.foundations[suit.ordinal() as usize].extend_face_up([card]);
        self.refresh_won();
        Ok(())
    }

    /// Checks a talon-to-tableau move without applying it.
    ///
    /// # Errors
    ///
    /// Returns why the move is rejected.
    pub fn check_talon_move(&self, to: usize) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let dest = self.column(to)?;
        let card = self.talon.top_card().map_err(|_| MoveError::EmptySource)?;
        if !tableau_accepts(dest, card) {
            return Err(MoveError::Illegal);
        }
        Ok(())
    }

    /// Moves the talon's top card onto column `to`.
    ///
    /// # Errors
    ///
    /// Returns why the move is rejected; the game is unchanged.
    pub fn move_talon_to_tableau(&mut self, to: usize) -> Result<(), MoveError> {
        self.check_talon_move(to)?;
        let card = self.talon.pop_top().map_err(|_| MoveError::EmptySource)?;
        self.tableau[to].extend_face_up([card]);
        Ok(())
    }

    /// Checks a foundation-to-tableau move without applying it.
    ///
    /// # Errors
    ///
    /// Returns why the move is rejected.
    pub fn check_foundation_move(&self, suit: Suit, to: usize) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let dest = self.column(to)?;
        let card = self
            .foundation(suit)
            .top_card()
            .map_err(|_| MoveError::EmptySource)?;
        if !tableau_accepts(dest, card) {
            return Err(MoveError::Illegal);
        }
        Ok(())
    }

    /// Moves the top card of the foundation of `suit` back onto column `to`.
    ///
    /// # Errors
    ///
    /// Returns why the move is rejected; the game is unchanged.
    pub fn move_foundation_to_tableau(&mut self, suit: Suit, to: usize) -> Result<(), MoveError> {
        self.check_foundation_move(suit, to)?;
        let card = self.foundations[suit.ordinal() as usize]
            .pop_top()
            .map_err(|_| MoveError::EmptySource)?;
        self.tableau[to].extend_face_up([card]);
        Ok(())
    }

    /// Applies any move.
    ///
    /// # Errors
    ///
    /// Returns why the move is rejected; the game is unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<GameState, MoveError> {
        match mv {
            Move::Draw => {
                self.draw()?;
            }
            Move::TableauToTableau { from, to, count } => {
                self.move_tableau_to_tableau(from, to, count)?;
            }
            Move::ToFoundation { from, suit } => self.play_to_foundation(from, suit)?,
            Move::TalonToTableau { to } => self.move_talon_to_tableau(to)?,
            Move::FoundationToTableau { suit, to } => self.move_foundation_to_tableau(suit, to)?,
        }
        Ok(self.state)
    }

    /// Lists every move that [`apply`](Self::apply) would accept.
    ///
    /// Empty once the game is won. A position where the only legal move is
    /// an endless cycle of draws is not detected here.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.ensure_playing().is_err() {
            return moves;
        }
        if self.can_draw() {
            moves.push(Move::Draw);
        }

        for from in 0..TABLEAU_COLUMNS {
            let movable = self.tableau[from].face_up_count();
            for count in 1..=movable {
                for to in 0..TABLEAU_COLUMNS {
                    if self.can_move_cards(from, to, count) {
                        moves.push(Move::TableauToTableau { from, to, count });
                    }
                }
            }
        }

        let sources = (0..TABLEAU_COLUMNS)
            .map(Source::Tableau)
            .chain(core::iter::once(Source::Talon));
        for from in sources {
            let Ok(Ok(card)) = self.source_pile(from).map(Pile::top_card) else {
                continue;
            };
            if self.can_play_to_foundation(from, card.suit()) {
                moves.push(Move::ToFoundation {
                    from,
                    suit: card.suit(),
                });
            }
        }

        for to in 0..TABLEAU_COLUMNS {
            if self.check_talon_move(to).is_ok() {
                moves.push(Move::TalonToTableau { to });
            }
            for suit in Suit::ALL {
                if self.check_foundation_move(suit, to).is_ok() {
                    moves.push(Move::FoundationToTableau { suit, to });
                }
            }
        }
        moves
    }

    /// Returns whether any move is legal.
    #[must_use]
    pub fn has_legal_moves(&self) -> bool {
        !self.legal_moves().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn runs_descend_and_alternate() {
        assert!(is_run(&[]));
        assert!(is_run(&[card(Rank::Four, Suit::Hearts)]));
        assert!(is_run(&[
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Eight, Suit::Diamonds),
            card(Rank::Seven, Suit::Spades),
        ]));
        assert!(!is_run(&[
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Eight, Suit::Spades),
        ]));
        assert!(!is_run(&[
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Seven, Suit::Hearts),
        ]));
        assert!(!is_run(&[
            card(Rank::Eight, Suit::Hearts),
            card(Rank::Nine, Suit::Clubs),
        ]));
    }

    #[test]
    fn foundation_keyed_by_suit() {
        let empty = Pile::new();
        assert!(foundation_accepts(&empty, Suit::Clubs, card(Rank::Ace, Suit::Clubs)));
        assert!(!foundation_accepts(&empty, Suit::Hearts, card(Rank::Ace, Suit::Clubs)));
        assert!(!foundation_accepts(&empty, Suit::Clubs, card(Rank::Two, Suit::Clubs)));
    }
}
