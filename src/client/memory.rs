use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::client::EvalService;
use crate::core::ClientError;
use crate::data::{Example, Feedback, Run};

/// In-process [`EvalService`] used by the integration tests.
///
/// Datasets are seeded up front; runs and feedback accumulate in call order so
/// tests can inspect exactly what the harness recorded.
#[derive(Default)]
pub struct InMemoryService {
    datasets: RwLock<HashMap<String, Vec<Example>>>,
    runs: RwLock<Vec<Run>>,
    feedback: RwLock<Vec<Feedback>>,
}

impl InMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_dataset(&self, name: impl Into<String>, examples: Vec<Example>) {
        self.datasets.write().unwrap().insert(name.into(), examples);
    }

    /// Every run recorded so far, across all projects.
    pub fn all_runs(&self) -> Vec<Run> {
        self.runs.read().unwrap().clone()
    }

    /// Every feedback entry recorded so far.
    pub fn all_feedback(&self) -> Vec<Feedback> {
        self.feedback.read().unwrap().clone()
    }
}

#[async_trait]
impl EvalService for InMemoryService {
    async fn list_examples(&self, dataset_name: &str) -> Result<Vec<Example>, ClientError> {
        self.datasets
            .read()
            .unwrap()
            .get(dataset_name)
            .cloned()
            .ok_or_else(|| ClientError::DatasetNotFound {
                name: dataset_name.to_string(),
            })
    }

    async fn create_run(&self, run: &Run) -> Result<(), ClientError> {
        self.runs.write().unwrap().push(run.clone());
        Ok(())
    }

    async fn update_run(&self, run: &Run) -> Result<(), ClientError> {
        let mut runs = self.runs.write().unwrap();
        let stored = runs
            .iter_mut()
            .find(|stored| stored.id == run.id)
            .ok_or(ClientError::RunNotFound { id: run.id })?;
        *stored = run.clone();
        Ok(())
    }

    async fn list_runs(&self, project_name: &str) -> Result<Vec<Run>, ClientError> {
        Ok(self
            .runs
            .read()
            .unwrap()
            .iter()
            .filter(|run| run.session_name == project_name)
            .cloned()
            .collect())
    }

    async fn create_feedback(&self, feedback: &Feedback) -> Result<(), ClientError> {
        self.feedback.write().unwrap().push(feedback.clone());
        Ok(())
    }

    async fn list_feedback(&self, run_ids: &[Uuid]) -> Result<Vec<Feedback>, ClientError> {
        Ok(self
            .feedback
            .read()
            .unwrap()
            .iter()
            .filter(|feedback| run_ids.contains(&feedback.run_id))
            .cloned()
            .collect())
    }
}
