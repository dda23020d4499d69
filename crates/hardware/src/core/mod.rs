//! Modelled hardware.
//!
//! This module contains the units the simulator models: the shared cache
//! with its replacement policies and the branch direction predictor.

/// Hardware units (cache, branch predictor).
pub mod units;
