use bon::Builder;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::client::EvalService;
use crate::core::ClientError;
use crate::data::{Run, RunType};

/// Everything needed to open a new traced run.
///
/// Root runs leave `trace_id`/`parent_run_id` unset; child runs inherit them
/// from their parent via [`RunHandle::child`].
#[derive(Builder, Clone, Debug)]
pub struct RunSpec {
    #[builder(into)]
    pub name: String,
    #[builder(default = RunType::Chain)]
    pub run_type: RunType,
    pub inputs: serde_json::Value,
    #[builder(into)]
    pub session_name: String,
    #[builder(default)]
    pub tags: Vec<String>,
    pub trace_id: Option<Uuid>,
    pub parent_run_id: Option<Uuid>,
    pub reference_example_id: Option<Uuid>,
}

/// A live traced unit of work.
///
/// `start` records the "start" event on the eval service; [`end`](RunHandle::end)
/// and [`fail`](RunHandle::fail) consume the handle and record the terminal
/// event. Grading strategies receive a handle and open children around their
/// internal LM calls so the full trace stays nested under one root.
pub struct RunHandle {
    service: Arc<dyn EvalService>,
    run: Run,
}

impl RunHandle {
    /// Opens a run and records its start event.
    pub async fn start(
        service: Arc<dyn EvalService>,
        spec: RunSpec,
    ) -> Result<RunHandle, ClientError> {
        let id = Uuid::new_v4();
        let run = Run {
            id,
            name: spec.name,
            run_type: spec.run_type,
            inputs: spec.inputs,
            outputs: None,
            error: None,
            start_time: Utc::now(),
            end_time: None,
            session_name: spec.session_name,
            tags: spec.tags,
            trace_id: spec.trace_id.unwrap_or(id),
            parent_run_id: spec.parent_run_id,
            reference_example_id: spec.reference_example_id,
        };
        service.create_run(&run).await?;
        debug!(
            run_id = %run.id,
            trace_id = %run.trace_id,
            run_type = run.run_type.as_str(),
            name = %run.name,
            "run started"
        );
        Ok(RunHandle { service, run })
    }

    /// Opens a child run nested under this one.
    pub async fn child(
        &self,
        name: impl Into<String>,
        run_type: RunType,
        inputs: serde_json::Value,
    ) -> Result<RunHandle, ClientError> {
        let spec = RunSpec::builder()
            .name(name.into())
            .run_type(run_type)
            .inputs(inputs)
            .session_name(self.run.session_name.clone())
            .tags(self.run.tags.clone())
            .trace_id(self.run.trace_id)
            .parent_run_id(self.run.id)
            .build();
        RunHandle::start(self.service.clone(), spec).await
    }

    pub fn run_id(&self) -> Uuid {
        self.run.id
    }

    pub fn trace_id(&self) -> Uuid {
        self.run.trace_id
    }

    /// Records the "end" event with the run's outputs and returns the finished run.
    pub async fn end(mut self, outputs: serde_json::Value) -> Result<Run, ClientError> {
        self.run.outputs = Some(outputs);
        self.run.end_time = Some(Utc::now());
        self.service.update_run(&self.run).await?;
        debug!(run_id = %self.run.id, "run ended");
        Ok(self.run)
    }

    /// Records the "error" event and returns the failed run.
    pub async fn fail(mut self, error: impl Into<String>) -> Result<Run, ClientError> {
        self.run.error = Some(error.into());
        self.run.end_time = Some(Utc::now());
        self.service.update_run(&self.run).await?;
        debug!(run_id = %self.run.id, error = %self.run.error.as_deref().unwrap_or_default(), "run failed");
        Ok(self.run)
    }
}
