use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::EvalService;
use crate::core::GradeError;
use crate::data::{Example, Run, RunType};
use crate::evaluator::{GradeRequest, StringEvaluator};
use crate::trace::{RunHandle, RunSpec};

/// Where the adapter records its trace events.
#[derive(Clone, Debug)]
pub struct TraceConfig {
    /// Project the root run is recorded under.
    pub session_name: String,
    pub tags: Vec<String>,
}

/// Wraps a grading strategy so every invocation is recorded as a traced run.
///
/// Each [`invoke`](TracedEvaluator::invoke) opens a root run ("start" event),
/// hands the strategy a handle so its internal LM calls nest underneath, and
/// closes the run with an "end" event — or an "error" event, after which the
/// original error is re-raised. No recovery, no retry.
pub struct TracedEvaluator {
    inner: Box<dyn StringEvaluator>,
    service: Arc<dyn EvalService>,
}

impl TracedEvaluator {
    pub fn new(inner: Box<dyn StringEvaluator>, service: Arc<dyn EvalService>) -> Self {
        Self { inner, service }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Grades one example, recording the invocation as a root run.
    ///
    /// Returns the finished run, whose `outputs` carry the grading output
    /// including its numeric `score`.
    pub async fn invoke(
        &self,
        example: &Example,
        config: &TraceConfig,
    ) -> Result<Run, GradeError> {
        let spec = RunSpec::builder()
            .name(self.inner.name())
            .run_type(RunType::Chain)
            .inputs(example.grade_inputs())
            .session_name(config.session_name.clone())
            .tags(config.tags.clone())
            .reference_example_id(example.id)
            .build();
        let handle = RunHandle::start(self.service.clone(), spec)
            .await
            .map_err(|source| GradeError::Trace { source })?;

        let request = GradeRequest::from_example(example);
        match self.inner.evaluate_strings(&request, &handle).await {
            Ok(output) => {
                debug!(example_id = %example.id, score = output.score, "grading succeeded");
                let run = handle
                    .end(output.to_outputs())
                    .await
                    .map_err(|source| GradeError::Trace { source })?;
                Ok(run)
            }
            // The grading error is what gets re-raised; a failure to record
            // the error event must not mask it.
            Err(err) => {
                if let Err(trace_err) = handle.fail(err.to_string()).await {
                    warn!(example_id = %example.id, error = %trace_err, "failed to record error event");
                }
                Err(err)
            }
        }
    }
}
