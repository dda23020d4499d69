//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors that accompany the cache
//! model: a static always-taken predictor and gshare. [`BranchUnit`] pairs
//! the configured predictor with its accuracy counters.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always taken).
pub mod static_bp;

use self::{gshare::GSharePredictor, static_bp::StaticPredictor};
use crate::config::{BranchPredictor as BpType, PredictorConfig};
use crate::stats::BranchStats;

/// Enum wrapper for static dispatch of Branch Predictors.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Always taken.
    Static(StaticPredictor),
    /// Global history XOR PC.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Creates the configured predictor.
    pub fn new(config: &PredictorConfig) -> Self {
        match config.policy {
            BpType::AlwaysTaken => Self::Static(StaticPredictor::new()),
            BpType::GShare => Self::GShare(GSharePredictor::new(config.history_bits)),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline]
    fn predict_branch(&self, pc: u64) -> bool {
        match self {
            Self::Static(p) => p.predict_branch(pc),
            Self::GShare(p) => p.predict_branch(pc),
        }
    }

    #[inline]
    fn update_branch(&mut self, pc: u64, taken: bool) {
        match self {
            Self::Static(p) => p.update_branch(pc, taken),
            Self::GShare(p) => p.update_branch(pc, taken),
        }
    }
}

/// A predictor together with its accuracy counters.
#[derive(Debug, Clone)]
pub struct BranchUnit {
    predictor: BranchPredictorWrapper,
    stats: BranchStats,
}

impl BranchUnit {
    /// Creates a unit around the configured predictor with zeroed counters.
    pub fn new(config: &PredictorConfig) -> Self {
        Self {
            predictor: BranchPredictorWrapper::new(config),
            stats: BranchStats::default(),
        }
    }

    /// Predicts the branch at `pc`.
    pub fn predict(&self, pc: u64) -> bool {
        self.predictor.predict_branch(pc)
    }

    /// Records the outcome of a predicted branch and trains the predictor.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch.
    /// * `prediction` - What [`predict`](Self::predict) returned for it.
    /// * `taken` - The resolved direction.
    pub fn update(&mut self, pc: u64, prediction: bool, taken: bool) {
        self.stats.num_branches += 1;
        if prediction != taken {
            self.stats.num_mispred += 1;
        }
        self.predictor.update_branch(pc, taken);
    }

    /// Accuracy counters.
    pub fn stats(&self) -> &BranchStats {
        &self.stats
    }

    /// Underlying predictor.
    pub fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }
}
