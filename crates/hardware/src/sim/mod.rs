//! Trace-driven simulation.
//!
//! Provides the driver side of the cache protocol: loading an event trace
//! from disk and replaying it against a cache and branch predictor under a
//! logical clock.

/// Trace file parsing.
pub mod trace;

/// Replay of a parsed trace.
pub mod replay;

pub use replay::Replay;
pub use trace::{TraceEvent, load_trace, parse_trace};
