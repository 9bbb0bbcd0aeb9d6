//! Bitmask 5-card hand evaluator.
//!
//! A hand is a 64-bit mask with one 13-bit block per suit
//! (Spades bits 0-12, Hearts 13-25, Diamonds 26-38, Clubs 39-51); bit `r - 2`
//! of a block is set when rank `r` of that suit is present. From the mask we
//! derive:
//!
//! - the OR-of-suits rank mask (13 bits)
//! - the flush mask: the suit block with at least five bits set, if any
//! - the straight high card, checking the nine five-bit runs and the wheel
//! - a per-rank count histogram, by popcount down each rank column
//!
//! Categories are tested best-first and the first match wins.

use super::card::{Card, Suit, MIN_RANK};
use super::{EvalError, Evaluator, HandCategory, HandRank};

/// Bits in one suit block.
const SUIT_BITS: usize = 13;

/// One full suit block.
const BLOCK_MASK: u64 = 0x1FFF;

/// Bit `r` of every suit block: shifting right by `r` and masking with this
/// isolates the four cards of one rank.
const RANK_COLUMN: u64 = 1 | (1 << 13) | (1 << 26) | (1 << 39);

/// Five consecutive ranks.
const STRAIGHT_RUN: u16 = 0b1_1111;

/// A, 2, 3, 4, 5.
const WHEEL: u16 = 0b1_0000_0000_1111;

/// Build the 64-bit mask for a set of cards, rejecting duplicates.
pub fn hand_mask(cards: &[Card]) -> Result<u64, EvalError> {
    let mut mask = 0u64;
    for card in cards {
        let bit = 1u64 << card.bit();
        if mask & bit != 0 {
            return Err(EvalError::DuplicateCard(*card));
        }
        mask |= bit;
    }
    Ok(mask)
}

#[inline]
fn suit_block(mask: u64, suit: Suit) -> u16 {
    ((mask >> (SUIT_BITS * suit.index())) & BLOCK_MASK) as u16
}

#[inline]
fn rank_mask(mask: u64) -> u16 {
    Suit::ALL
        .iter()
        .fold(0u16, |acc, &suit| acc | suit_block(mask, suit))
}

#[inline]
fn flush_mask(mask: u64) -> Option<u16> {
    Suit::ALL
        .iter()
        .map(|&suit| suit_block(mask, suit))
        .find(|block| block.count_ones() >= 5)
}

/// Highest card of the best straight in a rank mask. The wheel counts as
/// 5-high, below every other straight.
#[inline]
fn straight_high(ranks: u16) -> Option<u8> {
    for start in (0..=8u8).rev() {
        let run = STRAIGHT_RUN << start;
        if ranks & run == run {
            return Some(start + MIN_RANK + 4);
        }
    }
    if ranks & WHEEL == WHEEL {
        return Some(5);
    }
    None
}

#[inline]
fn rank_counts(mask: u64) -> [u8; 13] {
    let mut counts = [0u8; 13];
    for (r, count) in counts.iter_mut().enumerate() {
        *count = ((mask >> r) & RANK_COLUMN).count_ones() as u8;
    }
    counts
}

/// Ranks of the set bits of a rank mask, highest first.
#[inline]
fn ranks_descending(mut ranks: u16) -> ([u8; 5], usize) {
    let mut out = [0u8; 5];
    let mut len = 0;
    while ranks != 0 && len < 5 {
        let top = 15 - ranks.leading_zeros() as u8;
        out[len] = top + MIN_RANK;
        len += 1;
        ranks &= !(1 << top);
    }
    (out, len)
}

/// Rate the five cards held in `mask`.
fn rate(mask: u64) -> HandRank {
    let ranks = rank_mask(mask);
    let flush = flush_mask(mask);
    let straight = straight_high(ranks);

    if let Some(high) = flush.and_then(straight_high) {
        return HandRank::new(HandCategory::StraightFlush, &[high]);
    }

    let counts = rank_counts(mask);
    let mut quad = 0u8;
    let mut trip = 0u8;
    let mut pairs = [0u8; 2];
    let mut num_pairs = 0;
    let mut singles = [0u8; 5];
    let mut num_singles = 0;

    for r in (0..13usize).rev() {
        let rank = r as u8 + MIN_RANK;
        match counts[r] {
            4 => quad = rank,
            3 => trip = rank,
            2 if num_pairs < 2 => {
                pairs[num_pairs] = rank;
                num_pairs += 1;
            }
            1 if num_singles < 5 => {
                singles[num_singles] = rank;
                num_singles += 1;
            }
            _ => {}
        }
    }

    if quad != 0 {
        return HandRank::new(HandCategory::FourOfAKind, &[quad, singles[0]]);
    }

    if trip != 0 && num_pairs > 0 {
        return HandRank::new(HandCategory::FullHouse, &[trip, pairs[0]]);
    }

    if let Some(block) = flush {
        let (flush_ranks, len) = ranks_descending(block);
        return HandRank::new(HandCategory::Flush, &flush_ranks[..len]);
    }

    if let Some(high) = straight {
        return HandRank::new(HandCategory::Straight, &[high]);
    }

    if trip != 0 {
        return HandRank::new(HandCategory::ThreeOfAKind, &[trip, singles[0], singles[1]]);
    }

    if num_pairs == 2 {
        return HandRank::new(HandCategory::TwoPair, &[pairs[0], pairs[1], singles[0]]);
    }

    if num_pairs == 1 {
        return HandRank::new(
            HandCategory::OnePair,
            &[pairs[0], singles[0], singles[1], singles[2]],
        );
    }

    HandRank::new(HandCategory::HighCard, &singles[..num_singles])
}

/// Evaluate exactly five cards.
pub fn evaluate5(cards: &[Card]) -> Result<HandRank, EvalError> {
    if cards.len() != 5 {
        return Err(EvalError::WrongCardCount {
            expected: "5",
            found: cards.len(),
        });
    }
    Ok(rate(hand_mask(cards)?))
}

/// Evaluate the best five-card subset of 5-7 cards.
///
/// Seven cards means C(7,5) = 21 subsets.
pub fn evaluate_best(cards: &[Card]) -> Result<HandRank, EvalError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::WrongCardCount {
            expected: "5-7",
            found: n,
        });
    }
    hand_mask(cards)?;

    let bits: Vec<u64> = cards.iter().map(|c| 1u64 << c.bit()).collect();
    let mut best = HandRank::from_raw(0);

    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let rank = rate(bits[a] | bits[b] | bits[c] | bits[d] | bits[e]);
                        best = best.max(rank);
                    }
                }
            }
        }
    }

    Ok(best)
}

/// The bitmask evaluator as an [`Evaluator`].
///
/// Accepts 5-7 cards; more than five are rated by their best subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmaskEvaluator;

impl BitmaskEvaluator {
    /// Create a new bitmask evaluator.
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for BitmaskEvaluator {
    fn strength(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        if cards.len() == 5 {
            evaluate5(cards)
        } else {
            evaluate_best(cards)
        }
    }
}
