//! Poker hand evaluation.
//!
//! Two strategies resolve showdown strength:
//!
//! - [`bitmask`]: direct computation over a 64-bit card mask (13 bits per suit).
//! - [`table`]: an O(1) lookup keyed by the canonical 7-card hand key, built
//!   offline from the bitmask evaluator.
//!
//! Both produce a [`HandRank`], a totally ordered 24-bit value. Equal values
//! mean equal showdown strength (split pot).

pub mod bitmask;
pub mod card;
pub mod table;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

pub use bitmask::BitmaskEvaluator;
pub use card::{Card, Suit};
pub use table::HandTable;

/// Hand categories, ordered from worst to best.
///
/// The discriminant is the top nibble of the packed [`HandRank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No made hand.
    HighCard = 1,
    /// One pair.
    OnePair = 2,
    /// Two pair.
    TwoPair = 3,
    /// Trips.
    ThreeOfAKind = 4,
    /// Five in sequence; the wheel (A-5) is the lowest.
    Straight = 5,
    /// Five of one suit.
    Flush = 6,
    /// Trips plus a pair.
    FullHouse = 7,
    /// Quads.
    FourOfAKind = 8,
    /// Straight in one suit.
    StraightFlush = 9,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(HandCategory::HighCard),
            2 => Some(HandCategory::OnePair),
            3 => Some(HandCategory::TwoPair),
            4 => Some(HandCategory::ThreeOfAKind),
            5 => Some(HandCategory::Straight),
            6 => Some(HandCategory::Flush),
            7 => Some(HandCategory::FullHouse),
            8 => Some(HandCategory::FourOfAKind),
            9 => Some(HandCategory::StraightFlush),
            _ => None,
        }
    }
}

/// A hand rank that can be compared.
///
/// Format: `category (4 bits) | tiebreak1 (4 bits) | ... | tiebreak5 (4 bits)`.
/// Tiebreak ranks (2-14) are packed most-significant-first, so plain integer
/// comparison orders hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank(u32);

impl HandRank {
    /// Pack a category and up to five tiebreak ranks.
    pub(crate) fn new(category: HandCategory, tiebreaks: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &rank) in tiebreaks.iter().take(5).enumerate() {
            value |= (rank as u32 & 0xF) << (16 - i * 4);
        }
        Self(value)
    }

    /// Wrap a raw packed value (e.g. read from a hand table).
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw rank value for comparison.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Get the hand category, if the value carries a known one.
    pub fn category(&self) -> Option<HandCategory> {
        HandCategory::from_code(self.0 >> 20)
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            Some(category) => write!(f, "{} (0x{:06X})", category.name(), self.0),
            None => write!(f, "0x{:06X}", self.0),
        }
    }
}

/// Errors raised by card parsing, evaluation and the hand table.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A hand had the wrong number of cards.
    #[error("hand must have {expected} cards, got {found}")]
    WrongCardCount {
        /// Accepted count(s), e.g. `"5"` or `"5-7"`.
        expected: &'static str,
        /// Cards received.
        found: usize,
    },

    /// Two hands of different sizes were compared.
    #[error("cannot compare hands of {0} and {1} cards")]
    MismatchedHandSizes(usize, usize),

    /// Unrecognized suit symbol.
    #[error("invalid suit symbol: {0:?}")]
    InvalidSuit(char),

    /// Rank outside 2-14 or unparseable.
    #[error("invalid rank: {0:?}")]
    InvalidRank(String),

    /// The same card appeared twice in one hand.
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),

    /// A 7-card key absent from the precomputed table.
    #[error("no precomputed rank for hand key: {0}")]
    MissingEntry(String),

    /// A key too long for the 16-bit length field.
    #[error("hand key of {0} bytes does not fit the table format")]
    KeyTooLong(usize),

    /// The table file is malformed.
    #[error("corrupt hand table: {0}")]
    CorruptTable(String),

    /// Reading or writing the table file failed.
    #[error("hand table I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can rate a set of cards.
///
/// Implementations decide which hand sizes they accept.
pub trait Evaluator: Send + Sync {
    /// Rate a hand.
    fn strength(&self, cards: &[Card]) -> Result<HandRank, EvalError>;

    /// Compare two hands of equal size.
    fn compare(&self, a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
        if a.len() != b.len() {
            return Err(EvalError::MismatchedHandSizes(a.len(), b.len()));
        }
        Ok(self.strength(a)?.cmp(&self.strength(b)?))
    }
}

/// Lets the evaluator be picked at runtime.
impl<T: Evaluator + ?Sized> Evaluator for Box<T> {
    fn strength(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        (**self).strength(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_packing() {
        let rank = HandRank::new(HandCategory::TwoPair, &[8, 3, 11]);
        assert_eq!(rank.value(), 0x38_3B00);
        assert_eq!(rank.category(), Some(HandCategory::TwoPair));
        assert!(rank.value() < 1 << 24);
    }

    #[test]
    fn test_rank_display() {
        let rank = HandRank::new(HandCategory::StraightFlush, &[14]);
        assert_eq!(rank.to_string(), "Straight Flush (0x9E0000)");
        assert_eq!(HandRank::from_raw(0).to_string(), "0x000000");
    }
}
