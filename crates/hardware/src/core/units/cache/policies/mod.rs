//! Cache Replacement Policies.
//!
//! Implements the algorithms that select a victim way when a line must be
//! installed into a set.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used, by per-line timestamp.
//! - `Random`: Uniform draw over all ways.
//! - `StaticPartition`: Two-core way partitioning with a fixed core-0 quota.
//! - `DynamicPartition`: Two-core way partitioning with an adaptive quota.
//!
//! Every policy prefers an invalid way: a cold fill never evicts. Recency and
//! ownership live in the lines themselves, so the selectors only keep state
//! for the random generator and the adaptive quota.

/// Dynamic way partitioning policy.
pub mod dynamic_partition;

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

/// Static way partitioning policy.
pub mod static_partition;

pub use dynamic_partition::DynamicPartitionPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;
pub use static_partition::StaticPartitionPolicy;

use super::CacheLine;
use crate::common::CoreId;
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};

/// Trait for cache replacement policies.
///
/// Defines the interface for choosing a victim and observing fills.
pub trait ReplacementPolicy {
    /// Selects the way to overwrite in `set` for a fill requested by `core_id`.
    ///
    /// The returned way may hold a valid line; the cache is responsible for
    /// recording its eviction.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of one set, indexed by way. Never empty.
    /// * `core_id` - The core requesting the fill.
    ///
    /// # Returns
    ///
    /// The index of the way to evict, always `< set.len()`.
    fn victim(&mut self, set: &[CacheLine], core_id: CoreId) -> usize;

    /// Observes a completed fill by `core_id`.
    ///
    /// Stateless policies ignore this.
    fn on_fill(&mut self, _core_id: CoreId) {}
}

/// Returns the first way whose line is invalid.
#[inline]
pub fn first_invalid(set: &[CacheLine]) -> Option<usize> {
    set.iter().position(|line| !line.valid)
}

/// Returns the least recently used way among the lines matching `filter`.
///
/// Ties resolve to the lowest way: a later way replaces the current pick
/// only when its timestamp is strictly older.
pub fn lru_way(set: &[CacheLine], filter: impl Fn(&CacheLine) -> bool) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (way, line) in set.iter().enumerate().filter(|(_, line)| filter(line)) {
        match best {
            Some((_, oldest)) if line.last_access >= oldest => {}
            _ => best = Some((way, line.last_access)),
        }
    }
    best.map(|(way, _)| way)
}

/// Resolves a full set under two-core way partitioning.
///
/// The requester's quota is `core0_ways` for core 0 and the remaining ways
/// for any other core. A requester at or above its quota evicts its own LRU
/// line; otherwise it takes the other core's LRU line. If the preferred side
/// owns nothing the other side is used.
pub fn partition_victim(set: &[CacheLine], core_id: CoreId, core0_ways: usize) -> usize {
    let own = lru_way(set, |line| line.core_id == core_id);
    let other = lru_way(set, |line| line.core_id != core_id);

    let quota = if core_id == 0 {
        core0_ways
    } else {
        set.len().saturating_sub(core0_ways)
    };
    let occupying = set.iter().filter(|line| line.core_id == core_id).count();

    let pick = if occupying >= quota {
        own.or(other)
    } else {
        other.or(own)
    };
    // Both sides empty only for an empty set.
    pick.unwrap_or(0)
}

/// Enum wrapper for static dispatch of replacement policies.
///
/// The set of policies is closed, so a `match` replaces the vtable.
#[derive(Debug, Clone)]
pub enum VictimSelector {
    /// Least Recently Used.
    Lru(LruPolicy),
    /// Uniform random.
    Random(RandomPolicy),
    /// Fixed two-core way partition.
    StaticPartition(StaticPartitionPolicy),
    /// Adaptive two-core way partition.
    DynamicPartition(DynamicPartitionPolicy),
}

impl VictimSelector {
    /// Creates the selector for the configured policy.
    pub fn new(config: &CacheConfig) -> Self {
        match config.policy {
            PolicyType::Lru => Self::Lru(LruPolicy::new()),
            PolicyType::Random => Self::Random(RandomPolicy::new(config.random_seed)),
            PolicyType::StaticWayPartition => {
                Self::StaticPartition(StaticPartitionPolicy::new(config.swp_core0_ways))
            }
            PolicyType::DynamicWayPartition => Self::DynamicPartition(
                DynamicPartitionPolicy::new(config.ways, config.swp_core0_ways, &config.dwp),
            ),
        }
    }

    /// Returns the policy type this selector implements.
    pub fn kind(&self) -> PolicyType {
        match self {
            Self::Lru(_) => PolicyType::Lru,
            Self::Random(_) => PolicyType::Random,
            Self::StaticPartition(_) => PolicyType::StaticWayPartition,
            Self::DynamicPartition(_) => PolicyType::DynamicWayPartition,
        }
    }
}

impl ReplacementPolicy for VictimSelector {
    #[inline]
    fn victim(&mut self, set: &[CacheLine], core_id: CoreId) -> usize {
        match self {
            Self::Lru(p) => p.victim(set, core_id),
            Self::Random(p) => p.victim(set, core_id),
            Self::StaticPartition(p) => p.victim(set, core_id),
            Self::DynamicPartition(p) => p.victim(set, core_id),
        }
    }

    #[inline]
    fn on_fill(&mut self, core_id: CoreId) {
        match self {
            Self::Lru(p) => p.on_fill(core_id),
            Self::Random(p) => p.on_fill(core_id),
            Self::StaticPartition(p) => p.on_fill(core_id),
            Self::DynamicPartition(p) => p.on_fill(core_id),
        }
    }
}
