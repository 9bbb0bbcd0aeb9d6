//! Precomputed 7-card hand table.
//!
//! Each 7-card hand is canonicalized into a key by sorting its cards by rank
//! ascending, then suit symbol, and joining the `<rank><suit>` tokens with
//! `-` (e.g. `2C-2S-5H-9D-11S-13H-14S`). Building the table rates every
//! 7-card subset of a deck with the bitmask evaluator (best of 21 five-card
//! subsets) and stores the best value under that key.
//!
//! ## File format
//!
//! Big-endian, no version field:
//!
//! ```text
//! i32 entry_count
//! entry_count x ( i16 key_len | key_len bytes UTF-8 key | i32 rank_value )
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::bitmask::evaluate_best;
use super::card::Card;
use super::{EvalError, Evaluator, HandRank};

/// Cards per table key.
pub const TABLE_HAND_SIZE: usize = 7;

/// Canonical key for a hand: cards sorted by rank then suit, joined by `-`.
pub fn canonical_key(cards: &[Card]) -> String {
    let mut sorted = cards.to_vec();
    sorted.sort_by(Card::canonical_cmp);
    sorted
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Lookup table from canonical 7-card key to hand rank.
#[derive(Debug, Clone, Default)]
pub struct HandTable {
    ranks: FxHashMap<String, i32>,
}

impl HandTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for every 7-card subset of `deck`.
    ///
    /// The full 52-card deck yields C(52,7) = 133,784,560 entries; reduced
    /// decks are practical for tests and small games. Subsets are split by
    /// their lowest card and rated in parallel.
    pub fn build(deck: &[Card]) -> Result<Self, EvalError> {
        super::bitmask::hand_mask(deck)?;
        let n = deck.len();
        if n < TABLE_HAND_SIZE {
            return Ok(Self::new());
        }

        log::info!("building hand table over {} cards", n);

        let ranks = (0..=n - TABLE_HAND_SIZE)
            .into_par_iter()
            .map(|first| {
                let mut part = FxHashMap::default();
                let mut hand = [deck[first]; TABLE_HAND_SIZE];
                Self::fill(deck, first + 1, 1, &mut hand, &mut part)?;
                Ok::<_, EvalError>(part)
            })
            .try_reduce(FxHashMap::default, |mut acc, part| {
                acc.extend(part);
                Ok(acc)
            })?;

        log::info!("hand table built with {} entries", ranks.len());
        Ok(Self { ranks })
    }

    /// Recursively choose the remaining cards of `hand` from `deck[from..]`.
    fn fill(
        deck: &[Card],
        from: usize,
        depth: usize,
        hand: &mut [Card; TABLE_HAND_SIZE],
        out: &mut FxHashMap<String, i32>,
    ) -> Result<(), EvalError> {
        if depth == TABLE_HAND_SIZE {
            let best = evaluate_best(&hand[..])?;
            out.insert(canonical_key(&hand[..]), best.value() as i32);
            return Ok(());
        }
        let remaining = TABLE_HAND_SIZE - depth;
        for i in from..=deck.len() - remaining {
            hand[depth] = deck[i];
            Self::fill(deck, i + 1, depth + 1, hand, out)?;
        }
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Insert or replace a raw entry.
    pub fn insert(&mut self, key: String, rank: i32) {
        self.ranks.insert(key, rank);
    }

    /// Look up a 7-card hand. Hands outside the table are an error.
    pub fn lookup(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        if cards.len() != TABLE_HAND_SIZE {
            return Err(EvalError::WrongCardCount {
                expected: "7",
                found: cards.len(),
            });
        }
        let key = canonical_key(cards);
        match self.ranks.get(&key) {
            Some(&rank) => Ok(HandRank::from_raw(rank as u32)),
            None => Err(EvalError::MissingEntry(key)),
        }
    }

    /// Persist the table to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EvalError> {
        let path = path.as_ref();
        log::info!("saving hand table ({} entries) to {}", self.len(), path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a table from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EvalError> {
        let path = path.as_ref();
        log::info!("loading hand table from {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        let table = Self::read_from(&mut reader)?;
        log::info!("loaded hand table with {} entries", table.len());
        Ok(table)
    }

    /// Serialize into any writer. Entries are written in key order so the
    /// output is deterministic.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), EvalError> {
        let count = i32::try_from(self.ranks.len())
            .map_err(|_| EvalError::CorruptTable("too many entries".to_string()))?;
        writer.write_i32::<BigEndian>(count)?;

        let mut entries: Vec<(&String, &i32)> = self.ranks.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        for (key, &rank) in entries {
            let bytes = key.as_bytes();
            let len = i16::try_from(bytes.len()).map_err(|_| EvalError::KeyTooLong(bytes.len()))?;
            writer.write_i16::<BigEndian>(len)?;
            writer.write_all(bytes)?;
            writer.write_i32::<BigEndian>(rank)?;
        }
        Ok(())
    }

    /// Deserialize from any reader.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, EvalError> {
        let count = reader.read_i32::<BigEndian>()?;
        if count < 0 {
            return Err(EvalError::CorruptTable(format!("negative entry count {}", count)));
        }

        let capacity = (count as usize).min(1 << 20);
        let mut ranks = FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        for _ in 0..count {
            let len = reader.read_i16::<BigEndian>()?;
            if len < 0 {
                return Err(EvalError::CorruptTable(format!("negative key length {}", len)));
            }
            let mut bytes = vec![0u8; len as usize];
            reader.read_exact(&mut bytes)?;
            let key = String::from_utf8(bytes)
                .map_err(|e| EvalError::CorruptTable(format!("key is not UTF-8: {}", e)))?;
            let rank = reader.read_i32::<BigEndian>()?;
            ranks.insert(key, rank);
        }

        Ok(Self { ranks })
    }
}

impl Evaluator for HandTable {
    fn strength(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        self.lookup(cards)
    }
}
