use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::client::EvalService;
use crate::core::CheckError;
use crate::evaluate::{
    DatasetRunConfig, EXACT_SCORE_MATCH_KEY, ExactScoreMatch, RunEvaluator, run_on_dataset,
};
use crate::evaluator::{EvaluatorConfig, load_evaluator};
use crate::lm::LM;
use crate::trace::TracedEvaluator;

/// Fixed size of the benchmark datasets; a fully successful batch must record
/// exactly this many scored `exact_score_match` entries.
pub const EXPECTED_FEEDBACK_COUNT: usize = 100;

/// Random 8-character identifier appended to project names for uniqueness.
pub fn session_uid() -> String {
    let uid = Uuid::new_v4().simple().to_string();
    uid[..8].to_string()
}

/// Runs the full dataset-level accuracy check and returns the mean
/// `exact_score_match` score.
///
/// Loads the grading strategy named by `evaluator_config`, wraps it in a
/// [`TracedEvaluator`], batch-executes it against `dataset_name` under
/// `project_name` (tagged `int-test` plus `tags`), fetches all feedback for
/// the project's runs, and keeps the scored `exact_score_match` entries.
/// Anything other than exactly [`EXPECTED_FEEDBACK_COUNT`] of them is a
/// [`CheckError::InsufficientFeedback`] — the owning scenario fails outright.
pub async fn check_dataset(
    service: Arc<dyn EvalService>,
    lm: LM,
    evaluator_config: &EvaluatorConfig,
    dataset_name: &str,
    project_name: &str,
    tags: Vec<String>,
) -> Result<f64, CheckError> {
    let strategy = load_evaluator(evaluator_config, lm)?;
    let target = TracedEvaluator::new(strategy, service.clone());

    let mut all_tags = vec!["int-test".to_string()];
    all_tags.extend(tags);
    let run_config = DatasetRunConfig::builder()
        .dataset_name(dataset_name)
        .project_name(project_name)
        .tags(all_tags)
        .verbose(true)
        .build();
    let evaluators: Vec<Box<dyn RunEvaluator>> = vec![Box::new(ExactScoreMatch)];

    let summary = run_on_dataset(service.clone(), &target, &evaluators, &run_config).await?;

    let run_ids: Vec<Uuid> = service
        .list_runs(&summary.project_name)
        .await?
        .into_iter()
        .map(|run| run.id)
        .collect();
    let feedback = service.list_feedback(&run_ids).await?;
    let scores: Vec<f64> = feedback
        .iter()
        .filter(|entry| entry.key == EXACT_SCORE_MATCH_KEY)
        .filter_map(|entry| entry.score)
        .collect();

    if scores.len() != EXPECTED_FEEDBACK_COUNT {
        return Err(CheckError::InsufficientFeedback {
            key: EXACT_SCORE_MATCH_KEY,
            want: EXPECTED_FEEDBACK_COUNT,
            got: scores.len(),
        });
    }

    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    info!(
        project = %summary.project_name,
        evaluator = %evaluator_config.evaluator,
        mean,
        "dataset check complete"
    );
    Ok(mean)
}
