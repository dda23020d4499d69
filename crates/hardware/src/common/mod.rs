//! Common types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache engine, the
//! branch predictor, and the trace driver. It includes:
//! 1. **Identifiers:** Core identifiers and logical clock values.
//! 2. **Memory Access:** Classification of requests (read/write) and lookup outcomes.
//! 3. **Error Handling:** Construction, configuration, and trace errors.

/// Memory access type definitions.
pub mod data;

/// Error types for construction, configuration loading, and trace parsing.
pub mod error;

pub use data::{AccessType, CacheResult};
pub use error::{CacheError, ConfigError, TraceError};

/// Identifier of the core that issued a request.
///
/// Way-partitioned policies treat core 0 specially and every other id as
/// "the other core".
pub type CoreId = u32;

/// Logical clock value supplied by the driver on every access.
///
/// Must be non-decreasing across calls for LRU ordering to hold.
pub type Cycle = u64;
