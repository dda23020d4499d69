//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the history length (12 bits = 4K 2-bit counters)
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use super::BranchPredictor;

/// Longest supported history; bounds the table at 16M counters.
pub const MAX_HISTORY_BITS: usize = 24;

/// Counter value a fresh table starts at (weakly taken).
const WEAKLY_TAKEN: u8 = 2;

/// Saturation point of the 2-bit counters.
const STRONGLY_TAKEN: u8 = 3;

/// GShare Predictor structure.
#[derive(Debug, Clone)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes, newest in bit 0.
    ghr: u64,
    /// Mask selecting the history bits that index the table.
    mask: u64,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<u8>,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor.
    ///
    /// # Arguments
    ///
    /// * `history_bits` - History length; the table holds `2^history_bits`
    ///   counters. Capped at [`MAX_HISTORY_BITS`].
    pub fn new(history_bits: usize) -> Self {
        let bits = history_bits.min(MAX_HISTORY_BITS);
        let size = 1usize << bits;
        Self {
            ghr: 0,
            mask: (size as u64) - 1,
            pht: vec![WEAKLY_TAKEN; size],
        }
    }

    /// Current global history register.
    pub fn history(&self) -> u64 {
        self.ghr
    }

    /// Calculates the index into the Pattern History Table.
    fn index(&self, pc: u64) -> usize {
        ((pc ^ self.ghr) & self.mask) as usize
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns true if the counter at the hashed index is 2 or 3.
    fn predict_branch(&self, pc: u64) -> bool {
        self.pht[self.index(pc)] >= WEAKLY_TAKEN
    }

    /// Updates the 2-bit saturating counter in the PHT and shifts the new
    /// outcome into the Global History Register.
    fn update_branch(&mut self, pc: u64, taken: bool) {
        let idx = self.index(pc);
        let counter = &mut self.pht[idx];
        if taken {
            *counter = (*counter + 1).min(STRONGLY_TAKEN);
        } else {
            *counter = counter.saturating_sub(1);
        }
        self.ghr = ((self.ghr << 1) | u64::from(taken)) & self.mask;
    }
}
