//! Static Way Partitioning Replacement Policy.
//!
//! Splits each set between two cores: core 0 may occupy `core0_ways` ways and
//! core 1 the remainder. A core already at its quota replaces its own LRU
//! line; a core under quota reclaims the other core's LRU line. Any core id
//! other than 0 is treated as core 1.
//!
//! The quota is a soft cap: cold fills ignore ownership, so a core can exceed
//! its share until the other core starts missing in that set.

use super::{ReplacementPolicy, first_invalid, partition_victim};
use crate::common::CoreId;
use crate::core::units::cache::CacheLine;

/// Static partition policy state.
#[derive(Debug, Clone, Copy)]
pub struct StaticPartitionPolicy {
    /// Ways of each set reserved for core 0.
    core0_ways: usize,
}

impl StaticPartitionPolicy {
    /// Creates a policy giving core 0 `core0_ways` ways per set.
    pub fn new(core0_ways: usize) -> Self {
        Self { core0_ways }
    }

    /// Ways of each set reserved for core 0.
    pub fn core0_ways(&self) -> usize {
        self.core0_ways
    }
}

impl ReplacementPolicy for StaticPartitionPolicy {
    fn victim(&mut self, set: &[CacheLine], core_id: CoreId) -> usize {
        first_invalid(set).unwrap_or_else(|| partition_victim(set, core_id, self.core0_ways))
    }
}
