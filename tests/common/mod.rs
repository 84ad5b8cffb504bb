#![allow(dead_code)]

use std::sync::Arc;

use metaeval::{Chat, EvaluatorKind, ScriptedProvider};

/// Value of the last line in `prompt` starting with `label`.
///
/// The grader prompts restate their labels in a format section, so only the
/// last occurrence is the real field.
fn last_field(prompt: &str, label: &str) -> String {
    prompt
        .lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix(label))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_default()
}

/// A scripted provider that grades faithfully: it extracts the candidate and
/// reference answers from the rendered prompt and answers in the format the
/// given evaluator kind expects.
pub fn faithful_grader(kind: EvaluatorKind) -> Arc<ScriptedProvider> {
    Arc::new(ScriptedProvider::respond_with(move |chat: &Chat| {
        let prompt = chat.last_content();
        let (student, truth) = match kind {
            EvaluatorKind::LabeledCriteria => (
                last_field(prompt, "[Submission]:"),
                last_field(prompt, "[Reference]:"),
            ),
            _ => (
                last_field(prompt, "STUDENT ANSWER:"),
                last_field(prompt, "TRUE ANSWER:"),
            ),
        };
        let correct = !student.is_empty() && student == truth;

        match kind {
            EvaluatorKind::Qa => {
                if correct { "GRADE: CORRECT" } else { "GRADE: INCORRECT" }.to_string()
            }
            EvaluatorKind::CotQa => format!(
                "The student answer {} the true answer.\nGRADE: {}",
                if correct { "matches" } else { "contradicts" },
                if correct { "CORRECT" } else { "INCORRECT" },
            ),
            EvaluatorKind::LabeledCriteria => format!(
                "The submission {} the reference.\n{}",
                if correct { "agrees with" } else { "contradicts" },
                if correct { "Y" } else { "N" },
            ),
        }
    }))
}
