use minijinja::render;

use crate::evaluator::GradeRequest;

pub(crate) const QA_TEMPLATE: &str = "\
You are a teacher grading a quiz.
You are given a question, the student's answer, and the true answer, and are asked to score the student answer as either CORRECT or INCORRECT.

Example Format:
QUESTION: question here
STUDENT ANSWER: student's answer here
TRUE ANSWER: true answer here
GRADE: CORRECT or INCORRECT here

Grade the student answers based ONLY on their factual accuracy. Ignore differences in punctuation and phrasing between the student answer and true answer. It is OK if the student answer contains more information than the true answer, as long as it does not contain any conflicting statements. Begin!

QUESTION: {{ input }}
STUDENT ANSWER: {{ prediction }}
TRUE ANSWER: {{ reference }}
GRADE:";

pub(crate) const COT_QA_TEMPLATE: &str = "\
You are a teacher grading a quiz.
You are given a question, the student's answer, and the true answer, and are asked to score the student answer as either CORRECT or INCORRECT.
Write out in a step by step manner your reasoning to be sure that your conclusion is correct. Avoid simply stating the correct answer at the outset.

Example Format:
QUESTION: question here
STUDENT ANSWER: student's answer here
TRUE ANSWER: true answer here
EXPLANATION: step by step reasoning here
GRADE: CORRECT or INCORRECT here

Grade the student answers based ONLY on their factual accuracy. Ignore differences in punctuation and phrasing between the student answer and true answer. It is OK if the student answer contains more information than the true answer, as long as it does not contain any conflicting statements. Begin!

QUESTION: {{ input }}
STUDENT ANSWER: {{ prediction }}
TRUE ANSWER: {{ reference }}
EXPLANATION:";

pub(crate) const CRITERIA_TEMPLATE: &str = "\
You are assessing a submitted answer on a given task or input based on a set of criteria. Here is the data:
[BEGIN DATA]
***
[Input]: {{ input }}
***
[Submission]: {{ prediction }}
***
[Criteria]: {{ criteria }}
***
[Reference]: {{ reference }}
***
[END DATA]
Does the submission meet the Criteria? First, write out in a step by step manner your reasoning about the criteria to be sure that your conclusion is correct. Avoid simply stating the correct answers at the outset. Then print only the single character \"Y\" or \"N\" (without quotes or punctuation) on its own line corresponding to the correct answer.";

/// Builtin criterion descriptions for `labeled_criteria` grading.
pub fn builtin_criterion(name: &str) -> Option<&'static str> {
    match name {
        "correctness" => Some("Is the submission correct, accurate, and factual?"),
        "coherence" => Some("Is the submission coherent, well-structured, and organized?"),
        "relevance" => Some("Is the submission referring to a real quote from the text?"),
        "helpfulness" => Some("Is the submission helpful, insightful, and appropriate?"),
        _ => None,
    }
}

pub(crate) fn render_qa(request: &GradeRequest) -> String {
    render!(
        QA_TEMPLATE,
        input => request.input,
        prediction => request.prediction,
        reference => request.reference,
    )
}

pub(crate) fn render_cot_qa(request: &GradeRequest) -> String {
    render!(
        COT_QA_TEMPLATE,
        input => request.input,
        prediction => request.prediction,
        reference => request.reference,
    )
}

pub(crate) fn render_criteria(request: &GradeRequest, criteria: &str) -> String {
    render!(
        CRITERIA_TEMPLATE,
        input => request.input,
        prediction => request.prediction,
        reference => request.reference,
        criteria => criteria,
    )
}
