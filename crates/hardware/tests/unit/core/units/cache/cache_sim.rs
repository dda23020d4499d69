//! Cache Engine Unit Tests.
//!
//! Verifies the set-associative cache: geometry validation, address
//! decomposition, the access/install protocol, dirty tracking, and the
//! last-evicted bookkeeping. Caches are built directly from `CacheConfig`.

use llcsim_core::common::{AccessType, CacheError, CacheResult};
use llcsim_core::config::{CacheConfig, ReplacementPolicy as PolicyType};
use llcsim_core::stats::CacheStats;
use llcsim_core::{Cache, CacheLine};
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{build_cache, single_set, touch};

// ──────────────────────────────────────────────────────────
// Helper: the reference two-way cache
// ──────────────────────────────────────────────────────────

/// 32 bytes, 2 ways, 16-byte lines: a single set of two ways.
fn tiny_lru() -> Cache {
    build_cache(32, 2, 16, PolicyType::Lru)
}

// ══════════════════════════════════════════════════════════
// 1. Geometry
// ══════════════════════════════════════════════════════════

#[test]
fn geometry_is_derived_from_config() {
    let cache = build_cache(1024 * 1024, 8, 64, PolicyType::Lru);
    assert_eq!(cache.num_sets(), 2048);
    assert_eq!(cache.ways(), 8);
    assert_eq!(cache.line_bytes(), 64);
    assert_eq!(cache.policy(), PolicyType::Lru);
}

#[test]
fn new_cache_is_empty() {
    let cache = build_cache(256, 4, 16, PolicyType::Lru);
    for set in 0..cache.num_sets() {
        assert!(cache.set(set).iter().all(|line| *line == CacheLine::default()));
    }
    assert_eq!(*cache.stats(), CacheStats::default());
    assert!(!cache.last_evicted_line().valid);
    assert_eq!(cache.last_evicted_addr(), None);
}

#[rstest]
#[case(0, 2, 16)]
#[case(32, 0, 16)]
#[case(32, 2, 0)]
fn zero_dimension_rejected(#[case] size: usize, #[case] ways: usize, #[case] line: usize) {
    let err = Cache::new(&CacheConfig::new(size, ways, line, PolicyType::Lru)).unwrap_err();
    assert!(matches!(err, CacheError::ZeroGeometry { .. }), "{err}");
}

#[test]
fn indivisible_size_rejected() {
    let err = Cache::new(&CacheConfig::new(48, 2, 16, PolicyType::Lru)).unwrap_err();
    assert!(matches!(err, CacheError::Indivisible { .. }), "{err}");
}

#[test]
fn non_power_of_two_sets_rejected() {
    let err = Cache::new(&CacheConfig::new(96, 2, 16, PolicyType::Lru)).unwrap_err();
    assert!(matches!(err, CacheError::SetsNotPowerOfTwo { num_sets: 3 }), "{err}");
}

#[rstest]
#[case(PolicyType::StaticWayPartition)]
#[case(PolicyType::DynamicWayPartition)]
fn partition_quota_above_ways_rejected(#[case] policy: PolicyType) {
    let config = CacheConfig::new(1024, 8, 64, policy).with_core0_ways(9);
    let err = Cache::new(&config).unwrap_err();
    assert!(matches!(err, CacheError::QuotaExceedsWays { quota: 9, ways: 8 }), "{err}");
}

/// Non-partitioning policies ignore the quota.
#[test]
fn quota_ignored_for_lru() {
    let config = CacheConfig::new(1024, 8, 64, PolicyType::Lru).with_core0_ways(9);
    assert!(Cache::new(&config).is_ok());
}

// ══════════════════════════════════════════════════════════
// 2. Address decomposition
// ══════════════════════════════════════════════════════════

#[test]
fn set_index_and_tag_split_line_address() {
    // 1 KiB / (2 ways * 16 B) = 32 sets, 5 index bits.
    let cache = build_cache(1024, 2, 16, PolicyType::Lru);
    assert_eq!(cache.num_sets(), 32);
    assert_eq!(cache.set_index(0x123), 3);
    assert_eq!(cache.tag(0x123), 9);
    assert_eq!(cache.line_addr(9, 3), 0x123);
}

#[test]
fn single_set_cache_uses_whole_address_as_tag() {
    let cache = tiny_lru();
    assert_eq!(cache.num_sets(), 1);
    assert_eq!(cache.set_index(0xdead_beef), 0);
    assert_eq!(cache.tag(0xdead_beef), 0xdead_beef);
}

proptest! {
    #[test]
    fn line_address_round_trips(addr in any::<u64>(), sets_log2 in 0u32..12) {
        let num_sets = 1usize << sets_log2;
        let cache = build_cache(num_sets * 4 * 16, 4, 16, PolicyType::Lru);
        let set = cache.set_index(addr);
        prop_assert!(set < cache.num_sets());
        prop_assert_eq!(cache.line_addr(cache.tag(addr), set), addr);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Access / install protocol
// ══════════════════════════════════════════════════════════

#[test]
fn cold_access_misses_and_leaves_arena_untouched() {
    let mut cache = tiny_lru();
    assert_eq!(cache.access(5, false, 0, 1), CacheResult::Miss);
    assert!(!cache.contains(5));
    assert!(cache.set(0).iter().all(|line| !line.valid));
    assert_eq!(cache.stats().read_access, 1);
    assert_eq!(cache.stats().read_miss, 1);
}

#[test]
fn install_then_access_hits() {
    let mut cache = tiny_lru();
    assert_eq!(cache.access(5, false, 0, 1), CacheResult::Miss);
    cache.install(5, false, 0, 1);
    assert!(cache.contains(5));
    assert_eq!(cache.access(5, false, 0, 2), CacheResult::Hit);

    let stats = cache.stats();
    assert_eq!(stats.read_access, 2);
    assert_eq!(stats.read_miss, 1);
}

#[test]
fn repeated_access_hits_after_first_fill() {
    let mut cache = build_cache(1024, 4, 16, PolicyType::Lru);
    assert!(!touch(&mut cache, 0x42, AccessType::Read, 0, 1));
    for now in 2..10 {
        assert!(touch(&mut cache, 0x42, AccessType::Read, 0, now));
    }
    assert_eq!(cache.stats().read_access, 9);
    assert_eq!(cache.stats().read_miss, 1);
}

#[test]
fn install_records_owner_and_timestamp() {
    let mut cache = tiny_lru();
    cache.install(7, true, 1, 42);
    let line = cache.set(0)[0];
    assert_eq!(
        line,
        CacheLine {
            tag: 7,
            valid: true,
            dirty: true,
            core_id: 1,
            last_access: 42,
        }
    );
}

/// Installs never touch the access counters.
#[test]
fn install_does_not_count_accesses() {
    let mut cache = tiny_lru();
    cache.install(1, false, 0, 1);
    cache.install(2, true, 0, 2);
    assert_eq!(cache.stats().total_access(), 0);
    assert_eq!(cache.stats().total_miss(), 0);
}

#[test]
fn hit_updates_timestamp_but_not_owner() {
    let mut cache = tiny_lru();
    cache.install(3, false, 0, 1);
    assert!(cache.access(3, false, 1, 9).is_hit());
    let line = cache.set(0)[0];
    assert_eq!(line.last_access, 9);
    assert_eq!(line.core_id, 0);
    assert!(!line.dirty);
}

#[test]
fn write_hit_marks_dirty() {
    let mut cache = tiny_lru();
    cache.install(3, false, 0, 1);
    assert!(cache.access(3, true, 0, 2).is_hit());
    assert!(cache.set(0)[0].dirty);
    assert_eq!(cache.stats().write_access, 1);
    assert_eq!(cache.stats().write_miss, 0);
}

/// A read hit never cleans a dirty line.
#[test]
fn read_hit_keeps_dirty() {
    let mut cache = tiny_lru();
    cache.install(3, true, 0, 1);
    assert!(cache.access(3, false, 0, 2).is_hit());
    assert!(cache.set(0)[0].dirty);
}

#[test]
fn contains_has_no_side_effects() {
    let mut cache = tiny_lru();
    cache.install(3, false, 0, 1);
    assert!(cache.contains(3));
    assert!(!cache.contains(4));
    assert_eq!(cache.set(0)[0].last_access, 1);
    assert_eq!(cache.stats().total_access(), 0);
}

// ══════════════════════════════════════════════════════════
// 4. Eviction bookkeeping
// ══════════════════════════════════════════════════════════

/// Writes to lines 0, 1, 0, 2 in a single two-way set.
#[test]
fn write_sequence_evicts_dirty_lru_line() {
    let mut cache = tiny_lru();
    let results: Vec<bool> = [0u64, 1, 0, 2]
        .iter()
        .zip(1u64..)
        .map(|(&addr, now)| touch(&mut cache, addr, AccessType::Write, 0, now))
        .collect();

    assert_eq!(results, [false, false, true, false]);

    let stats = cache.stats();
    assert_eq!(stats.write_access, 4);
    assert_eq!(stats.write_miss, 3);
    assert_eq!(stats.read_access, 0);
    assert_eq!(stats.dirty_evicts, 1);

    let victim = cache.last_evicted_line();
    assert!(victim.valid && victim.dirty);
    assert_eq!(victim.tag, 1);
    assert_eq!(cache.last_evicted_addr(), Some(1));
    assert!(cache.contains(0));
    assert!(cache.contains(2));
    assert!(!cache.contains(1));
}

#[test]
fn clean_eviction_is_not_counted() {
    let mut cache = tiny_lru();
    for (now, addr) in (1u64..).zip([0u64, 1, 2]) {
        touch(&mut cache, addr, AccessType::Read, 0, now);
    }
    assert_eq!(cache.stats().dirty_evicts, 0);
    assert_eq!(cache.last_evicted_addr(), Some(0));
    assert!(!cache.last_evicted_line().dirty);
}

/// Filling an invalid way leaves an invalid "last evicted" line.
#[test]
fn cold_fill_evicts_nothing() {
    let mut cache = tiny_lru();
    cache.install(0, true, 0, 1);
    assert!(!cache.last_evicted_line().valid);
    assert_eq!(cache.last_evicted_addr(), None);
}

#[test]
fn last_evicted_addr_recombines_set_and_tag() {
    // 4 sets of 2 ways; lines 0x1, 0x5, 0x9 all map to set 1.
    let mut cache = build_cache(128, 2, 16, PolicyType::Lru);
    for (now, addr) in (1u64..).zip([0x1u64, 0x5, 0x9]) {
        touch(&mut cache, addr, AccessType::Write, 0, now);
    }
    assert_eq!(cache.last_evicted_addr(), Some(0x1));
    assert_eq!(cache.stats().dirty_evicts, 1);
}

#[test]
fn occupancy_counts_valid_lines_per_core() {
    let mut cache = single_set(4, PolicyType::Lru, 2);
    cache.install(0, false, 0, 1);
    cache.install(1, false, 1, 2);
    cache.install(2, false, 1, 3);
    assert_eq!(cache.occupancy(0, 0), 1);
    assert_eq!(cache.occupancy(0, 1), 2);
    assert_eq!(cache.occupancy(0, 2), 0);
}

#[test]
fn report_uses_label() {
    let mut cache = tiny_lru();
    touch(&mut cache, 0, AccessType::Read, 0, 1);
    let report = cache.report("LLC");
    assert!(report.starts_with("\nLLC_READ_ACCESS"));
    assert!(report.contains("LLC_READ_MISS       \t\t :          1\n"));
}

// ══════════════════════════════════════════════════════════
// 5. Invariants under arbitrary traffic
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn arbitrary_traffic_keeps_sets_consistent(
        ops in prop::collection::vec((0u64..64, any::<bool>(), 0u32..2), 1..200),
        policy in prop_oneof![
            Just(PolicyType::Lru),
            Just(PolicyType::Random),
            Just(PolicyType::StaticWayPartition),
            Just(PolicyType::DynamicWayPartition),
        ],
    ) {
        // 16 lines: 4 sets of 4 ways.
        let mut cache = build_cache(256, 4, 16, policy);
        for (now, &(addr, write, core)) in (1u64..).zip(ops.iter()) {
            touch(&mut cache, addr, AccessType::from(write), core, now);
            prop_assert!(cache.contains(addr));
        }

        let stats = *cache.stats();
        prop_assert_eq!(stats.total_access(), ops.len() as u64);
        prop_assert!(stats.read_miss <= stats.read_access);
        prop_assert!(stats.write_miss <= stats.write_access);
        prop_assert!(stats.dirty_evicts <= stats.total_miss());

        for set in 0..cache.num_sets() {
            let mut tags: Vec<u64> = cache
                .set(set)
                .iter()
                .filter(|line| line.valid)
                .map(|line| line.tag)
                .collect();
            let valid = tags.len();
            tags.sort_unstable();
            tags.dedup();
            prop_assert_eq!(tags.len(), valid, "duplicate tag in set {}", set);
        }
    }
}
