//! Set-Associative Cache Simulator.
//!
//! This module implements the shared cache engine. It models lookups,
//! fills, dirty tracking, and eviction bookkeeping for a cache whose sets
//! are stored as one contiguous arena indexed by `(set, way)`.
//!
//! The engine follows a two-step protocol driven by the caller:
//! 1. [`Cache::access`] looks the line up and counts the access (and miss).
//! 2. On a miss, [`Cache::install`] picks a victim, records it as the last
//!    evicted line, and fills the way.
//!
//! The two steps are never combined, so a caller modelling a lower level can
//! issue the fill whenever its own timing says the data arrived.

/// Cache replacement policy implementations (LRU, Random, static and dynamic way partitioning).
pub mod policies;

use serde::Serialize;
use tracing::{debug, trace};

use self::policies::{ReplacementPolicy, VictimSelector};
use crate::common::{CacheError, CacheResult, CoreId, Cycle};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::CacheStats;

/// Metadata of one cache way.
///
/// When `valid` is false the remaining fields carry no meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheLine {
    /// Line address bits above the set index.
    pub tag: u64,
    /// Whether the way holds a line.
    pub valid: bool,
    /// Whether the line was written since it was filled.
    pub dirty: bool,
    /// Core that installed the line.
    pub core_id: CoreId,
    /// Logical time of the last hit or of the fill.
    pub last_access: Cycle,
}

/// Set-associative cache with a configurable replacement policy.
///
/// Addresses passed to the cache are line addresses: byte addresses with the
/// intra-line offset already removed. The set index is the low
/// `log2(num_sets)` bits and the tag is the rest.
#[derive(Debug)]
pub struct Cache {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    line_bytes: usize,
    set_bits: u32,
    set_mask: u64,
    selector: VictimSelector,
    last_evicted: CacheLine,
    last_evicted_set: usize,
    stats: CacheStats,
}

impl Cache {
    /// Creates a cache with every line invalid and every counter zero.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity, associativity, line size, policy, and partition settings.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when the geometry has a zero dimension, does not
    /// divide into whole sets, yields a set count that is not a power of two,
    /// when a partitioning quota exceeds the associativity, or when the line
    /// arena cannot be allocated.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let size_bytes = config.size_bytes;
        let line_bytes = config.line_bytes;
        let ways = config.ways;

        if size_bytes == 0 || line_bytes == 0 || ways == 0 {
            return Err(CacheError::ZeroGeometry {
                size_bytes,
                line_bytes,
                ways,
            });
        }

        let set_bytes = line_bytes
            .checked_mul(ways)
            .filter(|set_bytes| size_bytes % set_bytes == 0)
            .ok_or(CacheError::Indivisible {
                size_bytes,
                line_bytes,
                ways,
            })?;

        let num_sets = size_bytes / set_bytes;
        if !num_sets.is_power_of_two() {
            return Err(CacheError::SetsNotPowerOfTwo { num_sets });
        }

        if matches!(
            config.policy,
            PolicyType::StaticWayPartition | PolicyType::DynamicWayPartition
        ) && config.swp_core0_ways > ways
        {
            return Err(CacheError::QuotaExceedsWays {
                quota: config.swp_core0_ways,
                ways,
            });
        }

        let total = num_sets * ways;
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(total)
            .map_err(|source| CacheError::Allocation {
                lines: total,
                source,
            })?;
        lines.resize(total, CacheLine::default());

        let set_bits = num_sets.trailing_zeros();
        debug!(
            size_bytes,
            line_bytes,
            ways,
            num_sets,
            policy = ?config.policy,
            "cache constructed"
        );

        Ok(Self {
            lines,
            num_sets,
            ways,
            line_bytes,
            set_bits,
            set_mask: (num_sets as u64) - 1,
            selector: VictimSelector::new(config),
            last_evicted: CacheLine::default(),
            last_evicted_set: 0,
            stats: CacheStats::default(),
        })
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Associativity (ways per set).
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Line size in bytes.
    pub fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Replacement policy in use.
    pub fn policy(&self) -> PolicyType {
        self.selector.kind()
    }

    /// Victim selector, for inspecting adaptive policy state.
    pub fn selector(&self) -> &VictimSelector {
        &self.selector
    }

    /// Set selected by a line address.
    #[inline(always)]
    pub fn set_index(&self, line_addr: u64) -> usize {
        (line_addr & self.set_mask) as usize
    }

    /// Tag of a line address.
    #[inline(always)]
    pub fn tag(&self, line_addr: u64) -> u64 {
        line_addr >> self.set_bits
    }

    /// Rebuilds a line address from its tag and set index.
    ///
    /// Inverse of [`Cache::set_index`] and [`Cache::tag`].
    #[inline(always)]
    pub fn line_addr(&self, tag: u64, set_index: usize) -> u64 {
        (tag << self.set_bits) | (set_index as u64 & self.set_mask)
    }

    /// Lines of one set, indexed by way.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= num_sets`.
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Number of valid lines in a set installed by `core_id`.
    pub fn occupancy(&self, set_index: usize, core_id: CoreId) -> usize {
        self.set(set_index)
            .iter()
            .filter(|line| line.valid && line.core_id == core_id)
            .count()
    }

    /// Checks residency without touching timestamps or statistics.
    pub fn contains(&self, line_addr: u64) -> bool {
        let tag = self.tag(line_addr);
        self.set(self.set_index(line_addr))
            .iter()
            .any(|line| line.valid && line.tag == tag)
    }

    /// Looks up a line and counts the access.
    ///
    /// On a hit the line's timestamp becomes `now` and a write marks it
    /// dirty; tag, validity, and owner are left alone. On a miss nothing in
    /// the arena changes and the caller is expected to [`install`](Self::install)
    /// the line.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - Address in units of lines.
    /// * `is_write` - Whether this access is a write.
    /// * `_core_id` - Requesting core; lookups are not partitioned.
    /// * `now` - Current logical clock.
    pub fn access(
        &mut self,
        line_addr: u64,
        is_write: bool,
        _core_id: CoreId,
        now: Cycle,
    ) -> CacheResult {
        let set_index = self.set_index(line_addr);
        let tag = self.tag(line_addr);
        let base = set_index * self.ways;

        if is_write {
            self.stats.write_access += 1;
        } else {
            self.stats.read_access += 1;
        }

        let set = &mut self.lines[base..base + self.ways];
        if let Some(line) = set.iter_mut().find(|line| line.valid && line.tag == tag) {
            line.last_access = now;
            if is_write {
                line.dirty = true;
            }
            return CacheResult::Hit;
        }

        if is_write {
            self.stats.write_miss += 1;
        } else {
            self.stats.read_miss += 1;
        }
        CacheResult::Miss
    }

    /// Installs a line after a miss.
    ///
    /// Selects a victim with the configured policy, keeps a copy of it as the
    /// last evicted line (counting a dirty eviction if it was valid and
    /// dirty), and overwrites the way with the new line owned by `core_id`.
    /// Access and miss counters are not touched.
    ///
    /// The caller must only install lines that just missed; installing a
    /// resident line would duplicate its tag within the set.
    ///
    /// # Arguments
    ///
    /// * `line_addr` - Address in units of lines.
    /// * `is_write` - Whether the fill was triggered by a write (line starts dirty).
    /// * `core_id` - Requesting core, recorded as the line's owner.
    /// * `now` - Current logical clock.
    pub fn install(&mut self, line_addr: u64, is_write: bool, core_id: CoreId, now: Cycle) {
        let set_index = self.set_index(line_addr);
        let tag = self.tag(line_addr);
        let way = self.find_victim(set_index, core_id);
        let idx = set_index * self.ways + way;

        let victim = self.lines[idx];
        if victim.valid {
            trace!(set_index, way, dirty = victim.dirty, owner = victim.core_id, "evict");
            if victim.dirty {
                self.stats.dirty_evicts += 1;
            }
        }
        self.last_evicted = victim;
        self.last_evicted_set = set_index;

        self.lines[idx] = CacheLine {
            tag,
            valid: true,
            dirty: is_write,
            core_id,
            last_access: now,
        };
        self.selector.on_fill(core_id);
    }

    /// Selects the way to replace in a set for a fill by `core_id`.
    ///
    /// The returned way may be valid; [`install`](Self::install) handles the eviction.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= num_sets`.
    pub fn find_victim(&mut self, set_index: usize, core_id: CoreId) -> usize {
        let base = set_index * self.ways;
        self.selector
            .victim(&self.lines[base..base + self.ways], core_id)
    }

    /// Copy of the way overwritten by the most recent install.
    ///
    /// Invalid until an install replaces a valid line. A caller owes a
    /// write-back when it is both valid and dirty.
    pub fn last_evicted_line(&self) -> &CacheLine {
        &self.last_evicted
    }

    /// Line address of the last evicted line, if it was valid.
    pub fn last_evicted_addr(&self) -> Option<u64> {
        self.last_evicted
            .valid
            .then(|| self.line_addr(self.last_evicted.tag, self.last_evicted_set))
    }

    /// Cumulative statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Formats the statistics report, each line prefixed by `label`.
    pub fn report(&self, label: &str) -> String {
        self.stats.report(label).to_string()
    }

    /// Prints the statistics report to stdout.
    pub fn print_stats(&self, label: &str) {
        self.stats.print(label);
    }
}
