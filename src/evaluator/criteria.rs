use async_trait::async_trait;

use crate::core::GradeError;
use crate::evaluator::{
    GradeOutput, GradeRequest, StringEvaluator, prompts, traced_completion, verdict,
};
use crate::lm::LM;
use crate::trace::RunHandle;

/// Criterion-keyed grading with a reference answer: the grader reasons about
/// the named criterion, then prints `Y` or `N` on its own line.
pub struct LabeledCriteriaEvaluator {
    lm: LM,
    criterion_name: String,
    criterion_description: String,
}

impl LabeledCriteriaEvaluator {
    pub fn new(lm: LM, criterion_name: String, criterion_description: String) -> Self {
        Self {
            lm,
            criterion_name,
            criterion_description,
        }
    }

    fn criteria_text(&self) -> String {
        format!("{}: {}", self.criterion_name, self.criterion_description)
    }
}

#[async_trait]
impl StringEvaluator for LabeledCriteriaEvaluator {
    fn name(&self) -> &'static str {
        "labeled_criteria"
    }

    async fn evaluate_strings(
        &self,
        request: &GradeRequest,
        trace: &RunHandle,
    ) -> Result<GradeOutput, GradeError> {
        let prompt = prompts::render_criteria(request, &self.criteria_text());
        let response = traced_completion(&self.lm, &prompt, "criteria-grader-llm", trace).await?;

        let text = response.output.content;
        let score = verdict::parse_yes_no(&text).map_err(|source| GradeError::Verdict {
            source,
            raw_response: text.clone(),
        })?;

        let reasoning = text.trim();
        Ok(GradeOutput {
            score,
            value: if score >= 1.0 { "Y" } else { "N" }.to_string(),
            reasoning: (!reasoning.is_empty()).then(|| reasoning.to_string()),
            usage: response.usage,
        })
    }
}
