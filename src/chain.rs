//! Seed derivation and the per-token hash chain.
//!
//! Every value here comes from XXH64 with seed 0. It is fast and spreads input
//! changes well, but it is not a cryptographic hash.

use log::debug;
use xxhash_rust::xxh64::xxh64;

use crate::error::PatternError;
use crate::words::WordCategory;

/// Seed for an arbitrary byte buffer.
pub fn seed_from_bytes(bytes: &[u8]) -> u64 {
    xxh64(bytes, 0)
}

/// Seed for a string, hashed as its UTF-8 bytes.
pub fn seed_from_str(s: &str) -> u64 {
    seed_from_bytes(s.as_bytes())
}

/// Seed for a freshly generated v4 UUID. The only non-deterministic seed.
pub fn random_seed() -> u64 {
    seed_from_bytes(uuid::Uuid::new_v4().as_bytes())
}

/// Re-hash a 64-bit value through its little-endian bytes.
pub fn mix(value: u64) -> u64 {
    xxh64(&value.to_le_bytes(), 0)
}

/// Derive the hash for the next token from `previous`.
///
/// Unless `allow_repeats` is set, the result never maps to the same index in a
/// list of `word_count` words as `previous` does: on a clash the candidate is
/// re-hashed and compared against the candidate it replaced. A single-word
/// list cannot avoid repeating, so it gets one mix like `allow_repeats`.
/// Returns `None` when `word_count` is zero.
pub fn next_hash(previous: u64, word_count: u64, allow_repeats: bool) -> Option<u64> {
    if word_count == 0 {
        return None;
    }

    let mut hash = mix(previous);
    if allow_repeats || word_count == 1 {
        return Some(hash);
    }

    let mut previous_index = previous % word_count;
    let mut current_index = hash % word_count;
    let mut times_repeated = 0;
    while current_index == previous_index {
        times_repeated += 1;
        if times_repeated > 1 {
            debug!(
                "previous hash ({}) and new hash ({}) map to the same index ({}) for the {}-th time. re-hashing...",
                previous, hash, current_index, times_repeated
            );
        }
        hash = mix(hash);
        previous_index = current_index;
        current_index = hash % word_count;
    }

    Some(hash)
}

/// Running hash state for a single render.
///
/// Starts at the input seed, so the first token's repeat check is made against
/// the seed's own index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashChain {
    state: u64,
    allow_repeats: bool,
}

impl HashChain {
    pub fn new(seed: u64, allow_repeats: bool) -> Self {
        Self {
            state: seed,
            allow_repeats,
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance the chain for a token drawing from a list of `word_count`
    /// `category` words and return the new state.
    pub fn advance(&mut self, category: WordCategory, word_count: usize) -> Result<u64, PatternError> {
        let hash = next_hash(self.state, word_count as u64, self.allow_repeats)
            .ok_or(PatternError::EmptyWordList(category))?;
        self.state = hash;
        Ok(hash)
    }
}
