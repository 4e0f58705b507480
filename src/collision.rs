//! Theoretical collision odds for a pattern.
//!
//! The estimate multiplies the sizes of the word lists a render touches. It
//! assumes every token is independent and that repeats are allowed, so with
//! repeat avoidance on, the real number of distinct outputs is somewhat lower
//! and the true odds somewhat worse. Treat it as an approximation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Word-list sizes seen during one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionAccumulator {
    sizes: Vec<u64>,
}

impl CollisionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, list_size: usize) {
        self.sizes.push(list_size as u64);
    }

    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    pub fn finish(self) -> CollisionReport {
        CollisionReport::from_sizes(self.sizes)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub list_sizes: Vec<u64>,
    /// Product of `list_sizes`, saturating at `u128::MAX`.
    pub total_combinations: u128,
    /// `100 / total_combinations`.
    pub probability_percent: f64,
}

impl CollisionReport {
    pub fn from_sizes(list_sizes: Vec<u64>) -> Self {
        let total_combinations = list_sizes
            .iter()
            .fold(1u128, |total, &size| total.saturating_mul(size as u128));
        let probability_percent = if total_combinations == 0 {
            100.0
        } else {
            100.0 / total_combinations as f64
        };

        Self {
            list_sizes,
            total_combinations,
            probability_percent,
        }
    }
}

impl Default for CollisionReport {
    /// Report for a pattern without tokens.
    fn default() -> Self {
        Self::from_sizes(Vec::new())
    }
}

impl fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "there is 1 in {} chance ({:.16}%) of hash collision given the current pattern (if allowing repeats)",
            self.total_combinations, self.probability_percent
        )
    }
}
