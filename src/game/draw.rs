use crate::error::DrawError;
use crate::pile::Pile;

use super::{GameState, Klondike};

impl Klondike {
    /// Turns stock cards onto the talon.
    ///
    /// Up to [`DrawMode::count`](crate::DrawMode::count) cards are turned,
    /// one at a time. With an empty stock the talon is recycled instead: it
    /// becomes the new stock, reversed and face-down, so cards come back in
    /// the order they were first drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not awaiting a move, both stock and
    /// talon are empty, or the redeal limit is used up. The game is
    /// unchanged on error.
    pub fn draw(&mut self) -> Result<GameState, DrawError> {
        match self.state {
            GameState::Setup => return Err(DrawError::NotDealt),
            GameState::Won => return Err(DrawError::GameOver),
            GameState::AwaitingMove => {}
        }

        if self.stock.is_empty() {
            return self.recycle();
        }

        let count = self.options.draw.count().min(self.stock.len());
        let turned = self
            .stock
            .remove_top_run(count)
            .map_err(|_| DrawError::StockExhausted)?;
        self.talon.extend_face_up(turned.into_iter().rev());
        Ok(self.state)
    }

    /// Returns whether [`draw`](Self::draw) would succeed.
    #[must_use]
    pub fn can_draw(&self) -> bool {
        self.state == GameState::AwaitingMove
            && (!self.stock.is_empty() || (!self.talon.is_empty() && self.redeal_allowed()))
    }

    fn redeal_allowed(&self) -> bool {
        self.options
            .redeal_limit
            .is_none_or(|limit| self.redeals < limit)
    }

    fn recycle(&mut self) -> Result<GameState, DrawError> {
        if self.talon.is_empty() {
            return Err(DrawError::StockExhausted);
        }
        if !self.redeal_allowed() {
            return Err(DrawError::RedealLimit);
        }

        let mut cards = self.talon.drain();
        cards.reverse();
        let face_down = cards.len();
        self.stock = Pile::from_cards(cards, face_down);
        self.redeals += 1;

        log::debug!("recycled talon into stock, redeal {}", self.redeals);
        Ok(self.state)
    }
}
