pub mod cot_qa;
pub mod criteria;
pub mod prompts;
pub mod qa;
mod verdict;

pub use cot_qa::*;
pub use criteria::*;
pub use prompts::*;
pub use qa::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::{debug, warn};

use crate::core::{GradeError, LoadError};
use crate::data::{Example, RunType};
use crate::lm::{Chat, LM, LMResponse, LmUsage, Message};
use crate::trace::RunHandle;

/// The grading strategies the loader knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// Chain-of-thought QA grading: reason step by step, verdict on a `GRADE:` line.
    CotQa,
    /// Plain QA grading: verdict is a bare `CORRECT`/`INCORRECT`.
    Qa,
    /// Criterion-keyed grading with a reference, `Y`/`N` verdict.
    LabeledCriteria,
}

impl EvaluatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluatorKind::CotQa => "cot_qa",
            EvaluatorKind::Qa => "qa",
            EvaluatorKind::LabeledCriteria => "labeled_criteria",
        }
    }
}

impl fmt::Display for EvaluatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluator-selection parameters, as passed to [`load_evaluator`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    pub evaluator: EvaluatorKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub criteria: Option<String>,
}

impl EvaluatorConfig {
    pub fn new(evaluator: EvaluatorKind) -> Self {
        Self {
            evaluator,
            criteria: None,
        }
    }

    pub fn with_criteria(evaluator: EvaluatorKind, criteria: impl Into<String>) -> Self {
        Self {
            evaluator,
            criteria: Some(criteria.into()),
        }
    }
}

/// One string-evaluation request: grade `prediction` against `reference`.
#[derive(Clone, Debug)]
pub struct GradeRequest {
    pub input: String,
    pub prediction: String,
    pub reference: String,
}

impl GradeRequest {
    pub fn from_example(example: &Example) -> Self {
        Self {
            input: example.input.clone(),
            prediction: example.input_prediction.clone(),
            reference: example.input_answer.clone(),
        }
    }
}

/// A grading strategy's output for one request.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GradeOutput {
    /// Numeric grade: `1.0` for a passing verdict, `0.0` otherwise.
    pub score: f64,
    /// The verdict token as the grader printed it (`CORRECT`, `N`, ...).
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub usage: LmUsage,
}

impl GradeOutput {
    /// The run `outputs` payload persisted for this grade.
    pub fn to_outputs(&self) -> serde_json::Value {
        json!({
            "score": self.score,
            "value": self.value,
            "reasoning": self.reasoning,
        })
    }
}

/// A loaded grading strategy.
///
/// Implementations must route their LM calls through the given trace handle
/// (via `traced_completion`) so the full trace stays nested under the
/// invocation's root run.
#[async_trait]
pub trait StringEvaluator: Send + Sync {
    fn name(&self) -> &'static str;

    async fn evaluate_strings(
        &self,
        request: &GradeRequest,
        trace: &RunHandle,
    ) -> Result<GradeOutput, GradeError>;
}

impl std::fmt::Debug for dyn StringEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringEvaluator")
            .field("name", &self.name())
            .finish()
    }
}

/// Produces the grading strategy named by `config`, backed by `lm`.
pub fn load_evaluator(
    config: &EvaluatorConfig,
    lm: LM,
) -> Result<Box<dyn StringEvaluator>, LoadError> {
    match config.evaluator {
        EvaluatorKind::Qa => Ok(Box::new(QaEvaluator::new(lm))),
        EvaluatorKind::CotQa => Ok(Box::new(CotQaEvaluator::new(lm))),
        EvaluatorKind::LabeledCriteria => {
            let name = config.criteria.as_deref().ok_or(LoadError::MissingCriteria)?;
            let description =
                builtin_criterion(name).ok_or_else(|| LoadError::UnknownCriterion {
                    name: name.to_string(),
                })?;
            Ok(Box::new(LabeledCriteriaEvaluator::new(
                lm,
                name.to_string(),
                description.to_string(),
            )))
        }
    }
}

/// First 160 characters of a prompt, for log lines.
fn preview(text: &str) -> &str {
    const MAX_CHARS: usize = 160;
    match text.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Runs one grader LM call as a child run of `trace`.
pub(crate) async fn traced_completion(
    lm: &LM,
    prompt: &str,
    name: &'static str,
    trace: &RunHandle,
) -> Result<LMResponse, GradeError> {
    debug!(name, prompt = %preview(prompt), "grader LM call");
    let child = trace
        .child(name, RunType::Llm, json!({ "prompt": prompt }))
        .await
        .map_err(|source| GradeError::Trace { source })?;

    let chat = Chat::new(vec![Message::user(prompt)]);
    match lm.call(chat).await {
        Ok(response) => {
            child
                .end(json!({ "output": response.output.content }))
                .await
                .map_err(|source| GradeError::Trace { source })?;
            Ok(response)
        }
        // The LM failure is what the caller needs to see; a failure to record
        // the error event is only logged.
        Err(err) => {
            if let Err(trace_err) = child.fail(err.to_string()).await {
                warn!(name, error = %trace_err, "failed to record error event");
            }
            Err(GradeError::Lm { source: err })
        }
    }
}
