//! Static Branch Predictor.
//!
//! Predicts every conditional branch as taken and keeps no history.

use super::BranchPredictor;

/// Always-taken predictor.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict_branch(&self, _pc: u64) -> bool {
        true
    }

    fn update_branch(&mut self, _pc: u64, _taken: bool) {}
}
