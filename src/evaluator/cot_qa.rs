use async_trait::async_trait;

use crate::core::GradeError;
use crate::evaluator::{
    GradeOutput, GradeRequest, StringEvaluator, prompts, traced_completion, verdict,
};
use crate::lm::LM;
use crate::trace::RunHandle;

/// Chain-of-thought QA grading: the grader reasons step by step, then prints
/// the verdict on a final `GRADE:` line. The reasoning is kept on the output.
pub struct CotQaEvaluator {
    lm: LM,
}

impl CotQaEvaluator {
    pub fn new(lm: LM) -> Self {
        Self { lm }
    }
}

#[async_trait]
impl StringEvaluator for CotQaEvaluator {
    fn name(&self) -> &'static str {
        "cot_qa"
    }

    async fn evaluate_strings(
        &self,
        request: &GradeRequest,
        trace: &RunHandle,
    ) -> Result<GradeOutput, GradeError> {
        let prompt = prompts::render_cot_qa(request);
        let response = traced_completion(&self.lm, &prompt, "cot-qa-grader-llm", trace).await?;

        let text = response.output.content;
        let (score, reasoning) =
            verdict::parse_graded(&text).map_err(|source| GradeError::Verdict {
                source,
                raw_response: text.clone(),
            })?;

        Ok(GradeOutput {
            score,
            value: if score >= 1.0 { "CORRECT" } else { "INCORRECT" }.to_string(),
            reasoning,
            usage: response.usage,
        })
    }
}
