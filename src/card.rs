//! Card types.
//!
//! Ranks and suits carry an explicit ordinal table instead of relying on
//! declaration order, so reordering the variants cannot change gameplay.

use core::cmp::Ordering;
use core::fmt;

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Number of cards in a complete foundation (Ace through King).
pub const FOUNDATION_SIZE: usize = 13;

/// Card rank, Ace low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    /// Ace.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the rank's position in the ordering, Ace = 0 through King = 12.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Ace => 0,
            Self::Two => 1,
            Self::Three => 2,
            Self::Four => 3,
            Self::Five => 4,
            Self::Six => 5,
            Self::Seven => 6,
            Self::Eight => 7,
            Self::Nine => 8,
            Self::Ten => 9,
            Self::Jack => 10,
            Self::Queen => 11,
            Self::King => 12,
        }
    }

    /// Returns the rank with the given ordinal, if any.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if (ordinal as usize) < Self::ALL.len() {
            Some(Self::ALL[ordinal as usize])
        } else {
            None
        }
    }

    /// Returns the rank one above this one, or `None` for a King.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Returns the English name of the rank.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ace => "Ace",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
            Self::Six => "Six",
            Self::Seven => "Seven",
            Self::Eight => "Eight",
            Self::Nine => "Nine",
            Self::Ten => "Ten",
            Self::Jack => "Jack",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Suit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Clubs and Spades.
    Black,
    /// Diamonds and Hearts.
    Red,
}

/// Card suit. Ordered Clubs < Diamonds < Hearts < Spades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Diamonds.
    Diamonds,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// All suits in ascending order.
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];

    /// Returns the suit's position in the ordering, Clubs = 0 through Spades = 3.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Clubs => 0,
            Self::Diamonds => 1,
            Self::Hearts => 2,
            Self::Spades => 3,
        }
    }

    /// Returns the suit's color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Clubs | Self::Spades => Color::Black,
            Self::Diamonds | Self::Hearts => Color::Red,
        }
    }

    /// Returns whether the suit is red.
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self.color(), Color::Red)
    }

    /// Returns the English name of the suit.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clubs => "Clubs",
            Self::Diamonds => "Diamonds",
            Self::Hearts => "Hearts",
            Self::Spades => "Spades",
        }
    }
}

impl PartialOrd for Suit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A playing card.
///
/// Equality is structural. The [`Ord`] impl is the full order used for
/// sorting: suit first, then rank within the suit. Gameplay compares ranks
/// through [`Card::outranks`] instead.
///
/// ```
/// use patience::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "Ace of Spades");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Returns the card's rank.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Returns the card's suit.
    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// Returns the card's color.
    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    /// Returns whether this card's rank is strictly higher than `other`'s,
    /// ignoring suit.
    #[must_use]
    pub const fn outranks(self, other: Self) -> bool {
        self.rank.ordinal() > other.rank.ordinal()
    }

    /// Returns whether this card is exactly one rank above `other`.
    #[must_use]
    pub const fn is_one_above(self, other: Self) -> bool {
        self.rank.ordinal() == other.rank.ordinal() + 1
    }

    /// Position of the card in the full order, 0 through 51.
    #[must_use]
    pub const fn index(self) -> usize {
        self.suit.ordinal() as usize * FOUNDATION_SIZE + self.rank.ordinal() as usize
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}
