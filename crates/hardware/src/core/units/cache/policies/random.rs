//! Random Replacement Policy.
//!
//! This policy evicts a random way once the set is full. It uses a seeded
//! xorshift generator so a given seed replays identically.

use super::{ReplacementPolicy, first_invalid};
use crate::common::CoreId;
use crate::core::units::cache::CacheLine;

/// Substitute for a zero seed, which would lock xorshift at zero.
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Internal state for the pseudo-random number generator.
    state: u64,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `seed` - Initial generator state. Zero is replaced by a fixed non-zero constant.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the generator and returns the next value.
    fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Returns the first invalid way, else a uniform draw over every way.
    fn victim(&mut self, set: &[CacheLine], _core_id: CoreId) -> usize {
        if let Some(way) = first_invalid(set) {
            return way;
        }
        (self.next() % set.len() as u64) as usize
    }
}
