use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// One labeled benchmark record from a remote dataset.
///
/// `output_correctness_score` is the ground-truth label: `1.0` when
/// `input_prediction` is a correct answer to `input`, `0.0` when it is not.
/// Examples are immutable once fetched.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Example {
    pub id: Uuid,
    /// The question posed to the system under evaluation.
    pub input: String,
    /// The candidate answer being graded.
    pub input_prediction: String,
    /// The reference answer.
    pub input_answer: String,
    /// Ground-truth correctness label for `input_prediction`.
    pub output_correctness_score: f64,
}

impl Example {
    pub fn new(
        input: impl Into<String>,
        input_prediction: impl Into<String>,
        input_answer: impl Into<String>,
        output_correctness_score: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            input: input.into(),
            input_prediction: input_prediction.into(),
            input_answer: input_answer.into(),
            output_correctness_score,
        }
    }

    /// The inputs recorded on the root run for a grading invocation.
    pub fn grade_inputs(&self) -> serde_json::Value {
        json!({
            "input": self.input,
            "input_prediction": self.input_prediction,
            "input_answer": self.input_answer,
        })
    }
}
