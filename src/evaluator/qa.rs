use async_trait::async_trait;

use crate::core::GradeError;
use crate::evaluator::{
    GradeOutput, GradeRequest, StringEvaluator, prompts, traced_completion, verdict,
};
use crate::lm::LM;
use crate::trace::RunHandle;

/// Plain QA grading: one LM call, bare `CORRECT`/`INCORRECT` verdict.
pub struct QaEvaluator {
    lm: LM,
}

impl QaEvaluator {
    pub fn new(lm: LM) -> Self {
        Self { lm }
    }
}

#[async_trait]
impl StringEvaluator for QaEvaluator {
    fn name(&self) -> &'static str {
        "qa"
    }

    async fn evaluate_strings(
        &self,
        request: &GradeRequest,
        trace: &RunHandle,
    ) -> Result<GradeOutput, GradeError> {
        let prompt = prompts::render_qa(request);
        let response = traced_completion(&self.lm, &prompt, "qa-grader-llm", trace).await?;

        let text = response.output.content;
        let score = verdict::parse_correct_incorrect(&text).map_err(|source| {
            GradeError::Verdict {
                source,
                raw_response: text.clone(),
            }
        })?;

        Ok(GradeOutput {
            score,
            value: if score >= 1.0 { "CORRECT" } else { "INCORRECT" }.to_string(),
            reasoning: None,
            usage: response.usage,
        })
    }
}
