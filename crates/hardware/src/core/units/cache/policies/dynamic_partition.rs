//! Dynamic Way Partitioning Replacement Policy.
//!
//! Uses the static partitioning rule with a core-0 quota that adapts to fill
//! pressure. Fills (installs, one per miss) are counted per core over an
//! epoch of `epoch_fills` installs. At the end of each epoch the quota moves
//! one way toward the core that filled more, bounded so that each core keeps
//! at least `min_ways` ways. Equal pressure leaves the quota unchanged.
//!
//! With fewer than two ways there is nothing to partition and the policy
//! behaves as plain LRU.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `victim()`: O(W)
//!   - `on_fill()`: O(1)
//! - **Space Complexity:** O(1); the quota is shared by all sets

use tracing::debug;

use super::{ReplacementPolicy, first_invalid, lru_way, partition_victim};
use crate::common::CoreId;
use crate::config::DynamicPartitionConfig;
use crate::core::units::cache::CacheLine;

/// Dynamic partition policy state.
#[derive(Debug, Clone)]
pub struct DynamicPartitionPolicy {
    /// Associativity of the cache.
    ways: usize,
    /// Current core-0 quota.
    core0_ways: usize,
    /// Lowest quota either core may be left with.
    floor: usize,
    /// Installs per adaptation epoch.
    epoch_fills: u64,
    /// Installs seen this epoch, `[core 0, other cores]`.
    fills: [u64; 2],
}

impl DynamicPartitionPolicy {
    /// Creates a dynamic partition policy.
    ///
    /// # Arguments
    ///
    /// * `ways` - Associativity of the cache.
    /// * `initial_core0_ways` - Starting core-0 quota; clamped into the legal range.
    /// * `config` - Epoch length and per-core floor.
    pub fn new(ways: usize, initial_core0_ways: usize, config: &DynamicPartitionConfig) -> Self {
        let floor = config.min_ways.min(ways / 2);
        let core0_ways = initial_core0_ways.clamp(floor, ways - floor);
        Self {
            ways,
            core0_ways,
            floor,
            epoch_fills: config.epoch_fills.max(1),
            fills: [0; 2],
        }
    }

    /// Current core-0 quota.
    pub fn core0_ways(&self) -> usize {
        self.core0_ways
    }

    /// Ends the epoch, shifting one way toward the busier core.
    fn adapt(&mut self) {
        let [core0, other] = self.fills;
        let before = self.core0_ways;
        if core0 > other && self.core0_ways < self.ways - self.floor {
            self.core0_ways += 1;
        } else if other > core0 && self.core0_ways > self.floor {
            self.core0_ways -= 1;
        }
        if self.core0_ways != before {
            debug!(
                core0_fills = core0,
                other_fills = other,
                from = before,
                to = self.core0_ways,
                "dynamic partition moved core 0 quota"
            );
        }
        self.fills = [0; 2];
    }
}

impl ReplacementPolicy for DynamicPartitionPolicy {
    fn victim(&mut self, set: &[CacheLine], core_id: CoreId) -> usize {
        if let Some(way) = first_invalid(set) {
            return way;
        }
        if self.ways < 2 {
            return lru_way(set, |_| true).unwrap_or(0);
        }
        partition_victim(set, core_id, self.core0_ways)
    }

    fn on_fill(&mut self, core_id: CoreId) {
        self.fills[usize::from(core_id != 0)] += 1;
        if self.fills[0] + self.fills[1] >= self.epoch_fills {
            self.adapt();
        }
    }
}
