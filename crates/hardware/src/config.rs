//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline cache geometry, partition quotas, and predictor sizing.
//! 2. **Structures:** Hierarchical config for general, cache, and predictor settings.
//! 3. **Enums:** Replacement policy and branch predictor types.
//!
//! Configuration is supplied as JSON (see [`Config::load`]) or built from
//! `Config::default()` and overridden field by field by the CLI.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of cores driving the shared cache.
    pub const NUM_CORES: usize = 2;

    /// Default cache size in bytes (1 MiB).
    pub const CACHE_SIZE: usize = 1024 * 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity.
    pub const CACHE_WAYS: usize = 8;

    /// Default core-0 way quota for static and dynamic partitioning (half of `CACHE_WAYS`).
    pub const SWP_CORE0_WAYS: usize = 4;

    /// Fills per adaptation epoch of the dynamic partition.
    pub const DWP_EPOCH_FILLS: u64 = 256;

    /// Minimum ways each core keeps under dynamic partitioning.
    pub const DWP_MIN_WAYS: usize = 1;

    /// Seed of the random replacement generator.
    pub const RANDOM_SEED: u64 = 123456789;

    /// Global history length of the gshare predictor, in bits.
    pub const GHR_BITS: usize = 12;
}

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which way to evict when a new
/// line must be installed. Every policy fills an invalid way first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the way with the oldest access timestamp; ties go to the lowest way.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly drawn way from the full associativity.
    #[serde(alias = "Random")]
    Random,
    /// Static way partitioning between two cores.
    ///
    /// Core 0 may hold at most `swp_core0_ways` ways of each set; core 1
    /// holds the remainder.
    #[serde(rename = "SWP", alias = "Swp", alias = "StaticWayPartition")]
    StaticWayPartition,
    /// Dynamic way partitioning between two cores.
    ///
    /// Like static partitioning, but the core-0 quota follows the observed
    /// per-core fill pressure.
    #[serde(rename = "DWP", alias = "Dwp", alias = "DynamicWayPartition")]
    DynamicWayPartition,
}

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Always predict taken.
    AlwaysTaken,
    /// Global history XOR PC indexed pattern history table.
    #[default]
    #[serde(alias = "Gshare", alias = "GSHARE")]
    GShare,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use llcsim_core::config::{Config, ReplacementPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_bytes, 1024 * 1024);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Lru);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use llcsim_core::config::{BranchPredictor, Config, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": {
///         "size_bytes": 65536,
///         "line_bytes": 64,
///         "ways": 16,
///         "policy": "SWP",
///         "swp_core0_ways": 12
///     },
///     "predictor": { "policy": "AlwaysTaken" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.ways, 16);
/// assert_eq!(config.cache.policy, ReplacementPolicy::StaticWayPartition);
/// assert_eq!(config.cache.swp_core0_ways, 12);
/// assert_eq!(config.predictor.policy, BranchPredictor::AlwaysTaken);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Shared cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Branch predictor configuration
    #[serde(default)]
    pub predictor: PredictorConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    ///
    /// Missing sections and fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Number of cores issuing requests to the shared cache
    #[serde(default = "GeneralConfig::default_num_cores")]
    pub num_cores: usize,
}

impl GeneralConfig {
    fn default_num_cores() -> usize {
        defaults::NUM_CORES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            num_cores: defaults::NUM_CORES,
        }
    }
}

/// Shared cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Ways of each set reserved for core 0 under way partitioning; core 1 gets the rest
    #[serde(default = "CacheConfig::default_swp_core0_ways")]
    pub swp_core0_ways: usize,

    /// Dynamic way partitioning tuning
    #[serde(default)]
    pub dwp: DynamicPartitionConfig,

    /// Seed for the random replacement generator
    #[serde(default = "CacheConfig::default_random_seed")]
    pub random_seed: u64,
}

impl CacheConfig {
    /// Builds a configuration from the four geometry parameters, leaving
    /// partitioning and seeding at their defaults.
    ///
    /// The core-0 quota defaults to half the ways.
    pub fn new(
        size_bytes: usize,
        ways: usize,
        line_bytes: usize,
        policy: ReplacementPolicy,
    ) -> Self {
        Self {
            size_bytes,
            line_bytes,
            ways,
            policy,
            swp_core0_ways: ways / 2,
            ..Self::default()
        }
    }

    /// Returns the configuration with a different core-0 way quota.
    #[must_use]
    pub fn with_core0_ways(mut self, quota: usize) -> Self {
        self.swp_core0_ways = quota;
        self
    }

    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    fn default_swp_core0_ways() -> usize {
        defaults::SWP_CORE0_WAYS
    }

    fn default_random_seed() -> u64 {
        defaults::RANDOM_SEED
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 1 MiB, 8-way, 64-byte lines, LRU, with an even 4/4 partition quota.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            swp_core0_ways: defaults::SWP_CORE0_WAYS,
            dwp: DynamicPartitionConfig::default(),
            random_seed: defaults::RANDOM_SEED,
        }
    }
}

/// Dynamic way partitioning configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicPartitionConfig {
    /// Installs observed before the quota is re-evaluated
    #[serde(default = "DynamicPartitionConfig::default_epoch_fills")]
    pub epoch_fills: u64,

    /// Ways each core is guaranteed regardless of pressure
    #[serde(default = "DynamicPartitionConfig::default_min_ways")]
    pub min_ways: usize,
}

impl DynamicPartitionConfig {
    fn default_epoch_fills() -> u64 {
        defaults::DWP_EPOCH_FILLS
    }

    fn default_min_ways() -> usize {
        defaults::DWP_MIN_WAYS
    }
}

impl Default for DynamicPartitionConfig {
    fn default() -> Self {
        Self {
            epoch_fills: defaults::DWP_EPOCH_FILLS,
            min_ways: defaults::DWP_MIN_WAYS,
        }
    }
}

/// Branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Prediction algorithm
    #[serde(default)]
    pub policy: BranchPredictor,

    /// Global history register length in bits (pattern table has `2^history_bits` counters)
    #[serde(default = "PredictorConfig::default_history_bits")]
    pub history_bits: usize,
}

impl PredictorConfig {
    fn default_history_bits() -> usize {
        defaults::GHR_BITS
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            policy: BranchPredictor::default(),
            history_bits: defaults::GHR_BITS,
        }
    }
}
