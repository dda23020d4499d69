//! Error definitions.
//!
//! This module defines the error types of the simulator. It provides:
//! 1. **Construction Errors:** Cache geometries that cannot be masked into a power-of-two set count.
//! 2. **Configuration Errors:** I/O and JSON failures while loading a [`Config`](crate::config::Config).
//! 3. **Trace Errors:** I/O failures and malformed lines in a replay trace.
//!
//! Lookups, installs, and victim selection never fail; every failure mode is
//! caught when the cache is built.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Errors raised while constructing a [`Cache`](crate::core::units::cache::Cache).
#[derive(Debug, Error)]
pub enum CacheError {
    /// One of size, line size, or associativity was zero.
    #[error("cache geometry must be non-zero (size={size_bytes}, line={line_bytes}, ways={ways})")]
    ZeroGeometry {
        /// Requested capacity in bytes.
        size_bytes: usize,
        /// Requested line size in bytes.
        line_bytes: usize,
        /// Requested associativity.
        ways: usize,
    },

    /// Capacity does not factor into whole sets.
    #[error("cache size {size_bytes} is not a multiple of {line_bytes}-byte lines x {ways} ways")]
    Indivisible {
        /// Requested capacity in bytes.
        size_bytes: usize,
        /// Requested line size in bytes.
        line_bytes: usize,
        /// Requested associativity.
        ways: usize,
    },

    /// The derived set count cannot be indexed by masking.
    #[error("set count {num_sets} is not a power of two")]
    SetsNotPowerOfTwo {
        /// Derived number of sets.
        num_sets: usize,
    },

    /// The core-0 partition quota exceeds the associativity.
    #[error("core 0 way quota {quota} exceeds associativity {ways}")]
    QuotaExceedsWays {
        /// Configured core-0 quota.
        quota: usize,
        /// Associativity of the cache.
        ways: usize,
    },

    /// The line arena could not be allocated.
    #[error("failed to allocate {lines} cache lines")]
    Allocation {
        /// Number of lines requested.
        lines: usize,
        /// Underlying allocator error.
        #[source]
        source: TryReserveError,
    },
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// The contents were not valid configuration JSON.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading or parsing a replay trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line did not match any event form.
    #[error("trace line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}
