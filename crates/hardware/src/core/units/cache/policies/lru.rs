//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line whose last access is oldest. Recency is read
//! from the `last_access` timestamp each line carries, so the policy itself
//! holds no per-set state.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()`: O(W) where W is the number of ways
//! - **Space Complexity:** O(1) beyond the per-line timestamps
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans slightly larger than the associativity (thrashing)

use super::{ReplacementPolicy, first_invalid, lru_way};
use crate::common::CoreId;
use crate::core::units::cache::CacheLine;

/// LRU Policy state.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl LruPolicy {
    /// Creates a new LRU policy instance.
    pub fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Returns the first invalid way, else the way with the smallest timestamp.
    fn victim(&mut self, set: &[CacheLine], _core_id: CoreId) -> usize {
        first_invalid(set)
            .or_else(|| lru_way(set, |_| true))
            .unwrap_or(0)
    }
}
