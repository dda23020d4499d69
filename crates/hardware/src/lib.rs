//! Shared last-level cache simulator library.
//!
//! This crate models a multi-core, set-associative cache for use inside a
//! cycle-level processor simulator, with the following:
//! 1. **Cache:** Line arena, lookup/install protocol, dirty and eviction bookkeeping.
//! 2. **Replacement:** LRU, random, and static/dynamic two-core way partitioning.
//! 3. **Branch prediction:** Always-taken and gshare direction predictors.
//! 4. **Simulation:** Trace parsing and replay under a logical clock.
//! 5. **Statistics:** Access/miss/eviction counters and fixed-format reports.

/// Common types (core ids, clock, access kinds, errors).
pub mod common;
/// Simulator configuration (defaults, enums, JSON-loadable structures).
pub mod config;
/// Modelled hardware units (cache, branch predictor).
pub mod core;
/// Trace loading and replay.
pub mod sim;
/// Statistics counters and reports.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The cache engine.
pub use crate::core::units::cache::{Cache, CacheLine};
/// Trace driver.
pub use crate::sim::Replay;
