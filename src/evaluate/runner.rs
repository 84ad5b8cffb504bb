use bon::Builder;
use futures::future::join_all;
use kdam::{BarExt, tqdm};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::EvalService;
use crate::core::ClientError;
use crate::data::Feedback;
use crate::evaluate::RunEvaluator;
use crate::trace::{TraceConfig, TracedEvaluator};

/// Parameters for one batch execution.
#[derive(Builder, Clone, Debug)]
pub struct DatasetRunConfig {
    #[builder(into)]
    pub dataset_name: String,
    #[builder(into)]
    pub project_name: String,
    #[builder(default)]
    pub tags: Vec<String>,
    /// Show a progress bar while grading.
    #[builder(default = false)]
    pub verbose: bool,
}

/// What a batch execution produced.
#[derive(Clone, Debug)]
pub struct DatasetRunSummary {
    pub project_name: String,
    /// Root run ids of the invocations that completed successfully.
    pub run_ids: Vec<Uuid>,
    pub example_count: usize,
    /// Invocations that failed; their runs carry the error, no feedback is recorded.
    pub error_count: usize,
}

/// Grades every example in the named dataset and records per-run feedback.
///
/// All examples are submitted at once (`join_all`); the service sees one root
/// run per example plus the grader's nested LM runs. A failed invocation is
/// logged and counted but does not abort the batch — the missing feedback
/// surfaces later as an insufficient-count failure in
/// [`check_dataset`](crate::check_dataset).
pub async fn run_on_dataset(
    service: Arc<dyn EvalService>,
    target: &TracedEvaluator,
    evaluators: &[Box<dyn RunEvaluator>],
    config: &DatasetRunConfig,
) -> Result<DatasetRunSummary, ClientError> {
    let examples = service.list_examples(&config.dataset_name).await?;
    info!(
        dataset = %config.dataset_name,
        project = %config.project_name,
        evaluator = target.name(),
        examples = examples.len(),
        "starting batch execution"
    );

    let trace_config = TraceConfig {
        session_name: config.project_name.clone(),
        tags: config.tags.clone(),
    };
    let progress = config
        .verbose
        .then(|| Mutex::new(tqdm!(total = examples.len(), desc = "grading")));

    let futures: Vec<_> = examples
        .iter()
        .map(|example| {
            let service = service.clone();
            let trace_config = &trace_config;
            let progress = progress.as_ref();
            async move {
                let outcome = target.invoke(example, trace_config).await;
                if let Some(bar) = progress {
                    let _ = bar.lock().unwrap().update(1);
                }
                match outcome {
                    Ok(run) => {
                        for evaluator in evaluators {
                            let result = evaluator.evaluate_run(&run, example);
                            let feedback = Feedback::for_run(run.id, result);
                            service.create_feedback(&feedback).await?;
                        }
                        Ok::<_, ClientError>(Some(run.id))
                    }
                    Err(err) => {
                        warn!(example_id = %example.id, error = %err, "grader invocation failed");
                        Ok(None)
                    }
                }
            }
        })
        .collect();

    let mut run_ids = Vec::new();
    let mut error_count = 0;
    for outcome in join_all(futures).await {
        match outcome? {
            Some(run_id) => run_ids.push(run_id),
            None => error_count += 1,
        }
    }

    info!(
        project = %config.project_name,
        completed = run_ids.len(),
        errors = error_count,
        "batch execution finished"
    );
    Ok(DatasetRunSummary {
        project_name: config.project_name.clone(),
        run_ids,
        example_count: examples.len(),
        error_count,
    })
}
