//! Hardware units.
//!
//! This module contains the shared cache and its victim selectors, and the
//! branch prediction unit that shares its saturating-counter idioms.

/// Branch prediction unit (always-taken, gshare).
pub mod bru;

/// Set-associative cache with replacement policies.
pub mod cache;
