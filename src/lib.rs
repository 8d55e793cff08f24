//! A patience (solitaire) rule engine with optional `no_std` support.
//!
//! The crate provides the card and pile model, shuffling through pluggable
//! randomness sources, and a [`Klondike`] type that enforces setup, move
//! legality, and the win condition. Front ends drive the engine through
//! its move methods or through the [`Variant`] contract.
//!
//! # Example
//!
//! ```
//! use patience::{Klondike, KlondikeOptions, SeededSource, Source, Suit};
//!
//! let mut game = Klondike::new(KlondikeOptions::default());
//! game.deal_from(&mut SeededSource::new(7)).unwrap();
//!
//! for mv in game.legal_moves() {
//!     println!("{mv:?}");
//! }
//! let _ = game.can_play_to_foundation(Source::Talon, Suit::Hearts);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod options;
pub mod pile;
pub mod random;
pub mod variant;

// Re-export main types
pub use card::{Card, Color, DECK_SIZE, FOUNDATION_SIZE, Rank, Suit};
pub use deck::Deck;
pub use error::{
    DealError, DeckError, DrawError, LayoutError, MoveError, PileError, RandomError,
};
pub use game::{Column, GameState, Klondike, Layout, Move, Source, TABLEAU_COLUMNS};
pub use options::{DrawMode, KlondikeOptions, RandomOptions};
pub use pile::Pile;
pub use random::{FallbackSource, RandomSource, SeededSource};
#[cfg(feature = "std")]
pub use random::LocalSource;
#[cfg(feature = "net")]
pub use random::RandomOrg;
pub use variant::{Player, RoundOutcome, Variant, is_black};
