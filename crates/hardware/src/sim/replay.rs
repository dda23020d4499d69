//! Replay: drives a cache and a branch predictor from a trace.
//!
//! The replay plays the role of the timing model around the cache. It owns
//! the logical clock (one tick per event), turns byte addresses into line
//! addresses, issues `access` followed by `install` on a miss, and tallies
//! the write-backs owed for dirty victims.

use tracing::{debug, warn};

use super::trace::TraceEvent;
use crate::common::{AccessType, CacheError, CacheResult, CoreId, Cycle};
use crate::config::Config;
use crate::core::units::bru::BranchUnit;
use crate::core::units::cache::Cache;
use crate::stats::{BranchStats, CacheStats};

/// Trace replay state.
#[derive(Debug)]
pub struct Replay {
    cache: Cache,
    branch_unit: BranchUnit,
    num_cores: usize,
    clock: Cycle,
    writebacks: u64,
    skipped: u64,
}

impl Replay {
    /// Builds the cache and predictor described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the cache geometry is rejected.
    pub fn new(config: &Config) -> Result<Self, CacheError> {
        Ok(Self {
            cache: Cache::new(&config.cache)?,
            branch_unit: BranchUnit::new(&config.predictor),
            num_cores: config.general.num_cores,
            clock: 0,
            writebacks: 0,
            skipped: 0,
        })
    }

    /// Performs one memory request at a byte address.
    ///
    /// Advances the clock, looks the line up, and installs it on a miss.
    pub fn access(&mut self, core_id: CoreId, kind: AccessType, addr: u64) -> CacheResult {
        self.clock += 1;
        let line_addr = addr / self.cache.line_bytes() as u64;
        let is_write = kind.is_write();

        let result = self.cache.access(line_addr, is_write, core_id, self.clock);
        if result == CacheResult::Miss {
            self.cache.install(line_addr, is_write, core_id, self.clock);
            let victim = self.cache.last_evicted_line();
            if victim.valid && victim.dirty {
                self.writebacks += 1;
            }
        }
        result
    }

    /// Resolves one conditional branch, returning whether it was predicted correctly.
    pub fn branch(&mut self, pc: u64, taken: bool) -> bool {
        self.clock += 1;
        let prediction = self.branch_unit.predict(pc);
        self.branch_unit.update(pc, prediction, taken);
        prediction == taken
    }

    /// Dispatches a single trace event.
    ///
    /// Events from cores outside the configured core count are skipped.
    pub fn step(&mut self, event: &TraceEvent) {
        if event.core_id() as usize >= self.num_cores {
            if self.skipped == 0 {
                warn!(
                    core_id = event.core_id(),
                    num_cores = self.num_cores,
                    "skipping events from unconfigured core"
                );
            }
            self.skipped += 1;
            return;
        }
        match *event {
            TraceEvent::Mem {
                core_id,
                kind,
                addr,
            } => {
                let _ = self.access(core_id, kind, addr);
            }
            TraceEvent::Branch { pc, taken, .. } => {
                let _ = self.branch(pc, taken);
            }
        }
    }

    /// Replays every event in order.
    pub fn run(&mut self, events: &[TraceEvent]) {
        for event in events {
            self.step(event);
        }
        debug!(
            events = events.len(),
            cycles = self.clock,
            writebacks = self.writebacks,
            skipped = self.skipped,
            "replay finished"
        );
    }

    /// The simulated cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Cache statistics.
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// Branch predictor statistics.
    pub fn branch_stats(&self) -> &BranchStats {
        self.branch_unit.stats()
    }

    /// Current logical clock (events processed).
    pub fn clock(&self) -> Cycle {
        self.clock
    }

    /// Write-backs owed for dirty victims.
    pub fn writebacks(&self) -> u64 {
        self.writebacks
    }

    /// Events skipped because their core id exceeded the configured count.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
