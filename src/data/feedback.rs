use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A `(key, score)` judgment emitted by a run evaluator for one run.
///
/// `score` is `None` when the run could not be judged (e.g. it carries no
/// numeric grade); such entries are stored but filtered out of aggregates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EvaluationResult {
    pub key: String,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
}

impl EvaluationResult {
    pub fn scored(key: impl Into<String>, score: f64) -> Self {
        Self {
            key: key.into(),
            score: Some(score),
            comment: None,
        }
    }

    pub fn unscored(key: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            score: None,
            comment: Some(comment.into()),
        }
    }
}

/// A persisted [`EvaluationResult`], keyed by run id and judge name.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Feedback {
    pub id: Uuid,
    pub run_id: Uuid,
    pub key: String,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<String>,
}

impl Feedback {
    pub fn for_run(run_id: Uuid, result: EvaluationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            key: result.key,
            score: result.score,
            comment: result.comment,
        }
    }
}
