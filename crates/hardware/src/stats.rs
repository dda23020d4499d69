//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters exposed to downstream tooling. It provides:
//! 1. **Cache counters:** Read/write accesses, read/write misses, and dirty evictions.
//! 2. **Derived rates:** Miss percentages that read as 0 when nothing was accessed.
//! 3. **Branch counters:** Predicted branches and mispredictions.
//! 4. **Reports:** Fixed-format, label-prefixed text whose field order and
//!    spelling are parsed by external scripts and must not change.

use std::fmt;

use serde::Serialize;

/// Returns `100 * part / whole`, or 0 when `whole` is 0.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * (part as f64) / (whole as f64)
    }
}

/// Cumulative counters of a single cache instance.
///
/// Accesses and misses are counted by `access`; dirty evictions by `install`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Read lookups (hits and misses).
    pub read_access: u64,
    /// Write lookups (hits and misses).
    pub write_access: u64,
    /// Read lookups that missed.
    pub read_miss: u64,
    /// Write lookups that missed.
    pub write_miss: u64,
    /// Installs that overwrote a valid, dirty line.
    pub dirty_evicts: u64,
}

impl CacheStats {
    /// Percentage of reads that missed.
    pub fn read_miss_percent(&self) -> f64 {
        percent(self.read_miss, self.read_access)
    }

    /// Percentage of writes that missed.
    pub fn write_miss_percent(&self) -> f64 {
        percent(self.write_miss, self.write_access)
    }

    /// Total lookups of either kind.
    pub fn total_access(&self) -> u64 {
        self.read_access + self.write_access
    }

    /// Total misses of either kind.
    pub fn total_miss(&self) -> u64 {
        self.read_miss + self.write_miss
    }

    /// Returns a displayable report with every line prefixed by `label`.
    pub fn report<'a>(&'a self, label: &'a str) -> CacheReport<'a> {
        CacheReport { stats: self, label }
    }

    /// Prints the report to stdout.
    pub fn print(&self, label: &str) {
        print!("{}", self.report(label));
    }
}

/// Label-prefixed cache statistics report.
///
/// Renders a leading blank line followed by seven `LABEL_FIELD : value` lines
/// in a fixed order. Counts are right-aligned in ten columns, percentages
/// carry three decimals.
#[derive(Debug)]
pub struct CacheReport<'a> {
    stats: &'a CacheStats,
    label: &'a str,
}

impl fmt::Display for CacheReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let l = self.label;
        writeln!(f)?;
        writeln!(f, "{l}_READ_ACCESS     \t\t : {:>10}", s.read_access)?;
        writeln!(f, "{l}_WRITE_ACCESS    \t\t : {:>10}", s.write_access)?;
        writeln!(f, "{l}_READ_MISS       \t\t : {:>10}", s.read_miss)?;
        writeln!(f, "{l}_WRITE_MISS      \t\t : {:>10}", s.write_miss)?;
        writeln!(f, "{l}_READ_MISS_PERC  \t\t : {:>10.3}", s.read_miss_percent())?;
        writeln!(f, "{l}_WRITE_MISS_PERC \t\t : {:>10.3}", s.write_miss_percent())?;
        writeln!(f, "{l}_DIRTY_EVICTS    \t\t : {:>10}", s.dirty_evicts)
    }
}

/// Branch prediction counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BranchStats {
    /// Conditional branches resolved.
    pub num_branches: u64,
    /// Branches whose prediction disagreed with the outcome.
    pub num_mispred: u64,
}

impl BranchStats {
    /// Percentage of branches mispredicted.
    pub fn mispred_percent(&self) -> f64 {
        percent(self.num_mispred, self.num_branches)
    }

    /// Returns a displayable report with every line prefixed by `label`.
    pub fn report<'a>(&'a self, label: &'a str) -> BranchReport<'a> {
        BranchReport { stats: self, label }
    }
}

/// Label-prefixed branch predictor report, in the same layout as [`CacheReport`].
#[derive(Debug)]
pub struct BranchReport<'a> {
    stats: &'a BranchStats,
    label: &'a str,
}

impl fmt::Display for BranchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let l = self.label;
        writeln!(f)?;
        writeln!(f, "{l}_NUM_BRANCHES    \t\t : {:>10}", s.num_branches)?;
        writeln!(f, "{l}_NUM_MISPRED     \t\t : {:>10}", s.num_mispred)?;
        writeln!(f, "{l}_MISPRED_PERC    \t\t : {:>10.3}", s.mispred_percent())
    }
}
