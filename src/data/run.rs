use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunType {
    /// A grading-strategy invocation (the root traced unit of work).
    Chain,
    /// A nested LM call issued by a grading strategy.
    Llm,
}

impl RunType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunType::Chain => "chain",
            RunType::Llm => "llm",
        }
    }
}

/// A record of one traced invocation, persisted on the eval service.
///
/// Root runs (`run_type == Chain`) carry the grading output in `outputs` and
/// link back to their benchmark [`Example`](crate::Example) through
/// `reference_example_id`. Nested LM calls share the root's `trace_id` and
/// point at it via `parent_run_id`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Run {
    pub id: Uuid,
    pub name: String,
    pub run_type: RunType,
    pub inputs: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub outputs: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Project this run was recorded under.
    pub session_name: String,
    pub tags: Vec<String>,
    pub trace_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent_run_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reference_example_id: Option<Uuid>,
}

impl Run {
    /// The numeric grade declared in `outputs`, if any.
    pub fn score(&self) -> Option<f64> {
        self.outputs.as_ref()?.get("score")?.as_f64()
    }

    pub fn is_root(&self) -> bool {
        self.parent_run_id.is_none()
    }
}
