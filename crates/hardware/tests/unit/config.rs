//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, policy names,
//! and file loading.

use std::io::Write;

use llcsim_core::common::ConfigError;
use llcsim_core::config::*;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.general.num_cores, 2);
    assert_eq!(config.cache.size_bytes, 1024 * 1024);
    assert_eq!(config.cache.line_bytes, 64);
    assert_eq!(config.cache.ways, 8);
    assert_eq!(config.cache.policy, ReplacementPolicy::Lru);
    assert_eq!(config.cache.swp_core0_ways, 4);
    assert_eq!(config.cache.random_seed, 123456789);
    assert_eq!(config.predictor.policy, BranchPredictor::GShare);
    assert_eq!(config.predictor.history_bits, 12);
}

#[test]
fn test_dwp_defaults() {
    let dwp = DynamicPartitionConfig::default();
    assert_eq!(dwp.epoch_fills, 256);
    assert_eq!(dwp.min_ways, 1);
}

#[test]
fn test_cache_config_new_halves_quota() {
    let cache = CacheConfig::new(4096, 16, 32, ReplacementPolicy::StaticWayPartition);
    assert_eq!(cache.size_bytes, 4096);
    assert_eq!(cache.ways, 16);
    assert_eq!(cache.line_bytes, 32);
    assert_eq!(cache.swp_core0_ways, 8);
    assert_eq!(cache.with_core0_ways(12).swp_core0_ways, 12);
}

#[test]
fn test_empty_json_is_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.cache.size_bytes, 1024 * 1024);
    assert_eq!(config.general.num_cores, 2);
}

#[test]
fn test_partial_cache_section() {
    let config = Config::from_json(r#"{ "cache": { "ways": 4 } }"#).unwrap();
    assert_eq!(config.cache.ways, 4);
    assert_eq!(config.cache.line_bytes, 64);
    assert_eq!(config.cache.policy, ReplacementPolicy::Lru);
}

#[rstest]
#[case("LRU", ReplacementPolicy::Lru)]
#[case("Lru", ReplacementPolicy::Lru)]
#[case("RANDOM", ReplacementPolicy::Random)]
#[case("SWP", ReplacementPolicy::StaticWayPartition)]
#[case("StaticWayPartition", ReplacementPolicy::StaticWayPartition)]
#[case("DWP", ReplacementPolicy::DynamicWayPartition)]
#[case("Dwp", ReplacementPolicy::DynamicWayPartition)]
fn test_policy_names(#[case] name: &str, #[case] expected: ReplacementPolicy) {
    let json = format!(r#"{{ "cache": {{ "policy": "{name}" }} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().cache.policy, expected);
}

#[test]
fn test_unknown_policy_rejected() {
    let err = Config::from_json(r#"{ "cache": { "policy": "MRU" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_dwp_section() {
    let json = r#"{
        "cache": {
            "policy": "DWP",
            "swp_core0_ways": 6,
            "dwp": { "epoch_fills": 64, "min_ways": 2 }
        }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.cache.policy, ReplacementPolicy::DynamicWayPartition);
    assert_eq!(config.cache.swp_core0_ways, 6);
    assert_eq!(config.cache.dwp.epoch_fills, 64);
    assert_eq!(config.cache.dwp.min_ways, 2);
}

#[rstest]
#[case("GShare", BranchPredictor::GShare)]
#[case("Gshare", BranchPredictor::GShare)]
#[case("GSHARE", BranchPredictor::GShare)]
#[case("AlwaysTaken", BranchPredictor::AlwaysTaken)]
fn test_predictor_names(#[case] name: &str, #[case] expected: BranchPredictor) {
    let json = format!(r#"{{ "predictor": {{ "policy": "{name}" }} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().predictor.policy, expected);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "general": {{ "num_cores": 4 }}, "cache": {{ "size_bytes": 8192, "random_seed": 7 }} }}"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.general.num_cores, 4);
    assert_eq!(config.cache.size_bytes, 8192);
    assert_eq!(config.cache.random_seed, 7);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
