//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements: a side-effect-free prediction followed by training
//! with the resolved outcome.

/// Trait for branch direction prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    fn predict_branch(&self, pc: u64) -> bool;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    ///
    /// Called once per branch, after [`predict_branch`](Self::predict_branch).
    fn update_branch(&mut self, pc: u64, taken: bool);
}
