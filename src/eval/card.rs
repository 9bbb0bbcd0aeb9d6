//! Card representation for the hand evaluator and the game rules.
//!
//! A card is an immutable `(rank, suit)` pair:
//! - rank 2-14 (14 = Ace)
//! - suit one of Spade, Heart, Diamond, Club
//!
//! Cards render as `<rank><suit symbol>` (e.g. `14S`, `10H`, `2C`), which is
//! also the token used for canonical hand keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::EvalError;

/// Lowest legal rank (deuce).
pub const MIN_RANK: u8 = 2;
/// Highest legal rank (ace).
pub const MAX_RANK: u8 = 14;

/// Card suit.
///
/// The discriminant is the suit's block index in the evaluator's 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    /// Spades (`S`)
    Spade = 0,
    /// Hearts (`H`)
    Heart = 1,
    /// Diamonds (`D`)
    Diamond = 2,
    /// Clubs (`C`)
    Club = 3,
}

impl Suit {
    /// All suits in mask-block order.
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    /// Parse a suit symbol. Unrecognized symbols are rejected.
    pub fn from_symbol(symbol: char) -> Result<Self, EvalError> {
        match symbol.to_ascii_uppercase() {
            'S' => Ok(Suit::Spade),
            'H' => Ok(Suit::Heart),
            'D' => Ok(Suit::Diamond),
            'C' => Ok(Suit::Club),
            _ => Err(EvalError::InvalidSuit(symbol)),
        }
    }

    /// Single-character symbol.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Diamond => 'D',
            Suit::Club => 'C',
        }
    }

    /// Block index (0-3) inside the 64-bit hand mask.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// Create a card from rank (2-14) and suit.
    #[inline]
    pub fn new(rank: u8, suit: Suit) -> Self {
        debug_assert!(
            (MIN_RANK..=MAX_RANK).contains(&rank),
            "rank must be 2-14"
        );
        Self { rank, suit }
    }

    /// Create a card, rejecting out-of-range ranks.
    pub fn try_new(rank: u8, suit: Suit) -> Result<Self, EvalError> {
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            return Err(EvalError::InvalidRank(rank.to_string()));
        }
        Ok(Self { rank, suit })
    }

    /// Rank (2-14).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Bit position in the 64-bit hand mask: 13 bits per suit block,
    /// bit `rank - 2` inside the block.
    #[inline]
    pub fn bit(&self) -> u32 {
        (13 * self.suit.index() + (self.rank - MIN_RANK) as usize) as u32
    }

    /// Canonical ordering used for hand keys: rank ascending, then suit symbol.
    pub fn canonical_cmp(&self, other: &Card) -> std::cmp::Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.suit.symbol().cmp(&other.suit.symbol()))
    }

    /// The full 52-card deck, suit by suit.
    pub fn deck() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| (MIN_RANK..=MAX_RANK).map(move |rank| Card::new(rank, suit)))
            .collect()
    }

    /// Parse a whitespace- or comma-separated list of cards, e.g. `"14S 13S 12S"`.
    pub fn parse_many(s: &str) -> Result<Vec<Card>, EvalError> {
        s.split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl FromStr for Card {
    type Err = EvalError;

    /// Parse `"<rank><suit>"`. Ranks may be numeric (`2`-`14`) or face
    /// letters (`T`, `J`, `Q`, `K`, `A`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let symbol = s
            .chars()
            .last()
            .ok_or_else(|| EvalError::InvalidRank(s.to_string()))?;
        let suit = Suit::from_symbol(symbol)?;
        let rank_str = &s[..s.len() - symbol.len_utf8()];

        let rank = match rank_str.to_ascii_uppercase().as_str() {
            "T" => 10,
            "J" => 11,
            "Q" => 12,
            "K" => 13,
            "A" => 14,
            other => other
                .parse::<u8>()
                .map_err(|_| EvalError::InvalidRank(rank_str.to_string()))?,
        };

        Card::try_new(rank, suit)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit.symbol())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new(14, Suit::Spade);
        assert_eq!(card.rank(), 14);
        assert_eq!(card.suit(), Suit::Spade);
        assert_eq!(card.to_string(), "14S");
        assert_eq!(card.bit(), 12);

        let deuce_clubs = Card::new(2, Suit::Club);
        assert_eq!(deuce_clubs.bit(), 39);
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!("14S".parse::<Card>().unwrap(), Card::new(14, Suit::Spade));
        assert_eq!("10h".parse::<Card>().unwrap(), Card::new(10, Suit::Heart));
        assert_eq!("Kd".parse::<Card>().unwrap(), Card::new(13, Suit::Diamond));
        assert_eq!("2C".parse::<Card>().unwrap(), Card::new(2, Suit::Club));

        assert!(matches!("14X".parse::<Card>(), Err(EvalError::InvalidSuit('X'))));
        assert!(matches!("1S".parse::<Card>(), Err(EvalError::InvalidRank(_))));
        assert!(matches!("15S".parse::<Card>(), Err(EvalError::InvalidRank(_))));
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_parse_many() {
        let cards = Card::parse_many("14S, 13S 12S").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2], Card::new(12, Suit::Spade));
    }

    #[test]
    fn test_deck() {
        let deck = Card::deck();
        assert_eq!(deck.len(), 52);
        let mut bits: Vec<u32> = deck.iter().map(|c| c.bit()).collect();
        bits.sort_unstable();
        bits.dedup();
        assert_eq!(bits.len(), 52);
    }

    #[test]
    fn test_canonical_order() {
        let a = Card::new(9, Suit::Spade);
        let b = Card::new(9, Suit::Club);
        let c = Card::new(3, Suit::Spade);
        assert_eq!(c.canonical_cmp(&a), std::cmp::Ordering::Less);
        assert_eq!(b.canonical_cmp(&a), std::cmp::Ordering::Less);
    }
}
