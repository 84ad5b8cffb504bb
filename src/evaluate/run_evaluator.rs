use crate::data::{EvaluationResult, Example, Run};

/// Feedback key under which [`ExactScoreMatch`] records its judgments.
pub const EXACT_SCORE_MATCH_KEY: &str = "exact_score_match";

/// A judge applied to every completed run in a batch.
///
/// Pure: implementations compute an [`EvaluationResult`] from the run and its
/// ground-truth example; the runner persists it.
pub trait RunEvaluator: Send + Sync {
    fn key(&self) -> &'static str;

    fn evaluate_run(&self, run: &Run, example: &Example) -> EvaluationResult;
}

/// Judges whether the run's declared numeric score exactly equals the
/// example's ground-truth label.
pub struct ExactScoreMatch;

impl RunEvaluator for ExactScoreMatch {
    fn key(&self) -> &'static str {
        EXACT_SCORE_MATCH_KEY
    }

    fn evaluate_run(&self, run: &Run, example: &Example) -> EvaluationResult {
        match run.score() {
            Some(predicted) => EvaluationResult::scored(
                self.key(),
                (predicted == example.output_correctness_score) as u8 as f64,
            ),
            None => EvaluationResult::unscored(self.key(), "run has no numeric score"),
        }
    }
}
