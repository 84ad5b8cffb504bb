//! Batch execution and the dataset-level accuracy check.
//!
//! The flow is linear: `run_on_dataset` grades every example in a named
//! dataset through a [`TracedEvaluator`](crate::TracedEvaluator) and persists
//! per-run [`Feedback`](crate::Feedback) from each [`RunEvaluator`];
//! [`check_dataset`] wraps that into the full check — load, wrap, run, fetch
//! feedback, assert the count, return the mean.

pub mod check;
pub mod run_evaluator;
pub mod runner;

pub use check::*;
pub use run_evaluator::*;
pub use runner::*;
