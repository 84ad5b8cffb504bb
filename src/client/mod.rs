pub mod memory;
pub mod remote;

pub use memory::*;
pub use remote::*;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::ClientError;
use crate::data::{Example, Feedback, Run};

/// The remote dataset/run/feedback store behind the harness.
///
/// [`RemoteClient`] is the HTTP implementation; [`InMemoryService`] backs the
/// integration tests. All run and feedback state lives behind this seam — the
/// harness keeps nothing locally.
#[async_trait]
pub trait EvalService: Send + Sync {
    /// Every example in the named dataset.
    async fn list_examples(&self, dataset_name: &str) -> Result<Vec<Example>, ClientError>;

    /// Records a freshly started run (the "start" trace event).
    async fn create_run(&self, run: &Run) -> Result<(), ClientError>;

    /// Replaces a run with its finished state (the "end"/"error" trace event).
    async fn update_run(&self, run: &Run) -> Result<(), ClientError>;

    /// Every run recorded under the named project.
    async fn list_runs(&self, project_name: &str) -> Result<Vec<Run>, ClientError>;

    async fn create_feedback(&self, feedback: &Feedback) -> Result<(), ClientError>;

    /// All feedback attached to any of the given runs.
    async fn list_feedback(&self, run_ids: &[Uuid]) -> Result<Vec<Feedback>, ClientError>;
}
