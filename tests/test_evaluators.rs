mod common;

use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

use common::faithful_grader;
use metaeval::{
    EvaluatorConfig, EvaluatorKind, GradeError, GradeRequest, InMemoryService, LM, LMConfig,
    LoadError, RunHandle, RunSpec, ScriptedProvider, StringEvaluator, load_evaluator,
};

fn lm_with(provider: Arc<ScriptedProvider>) -> LM {
    LM::new(provider, LMConfig::default())
}

async fn root_handle(service: Arc<InMemoryService>) -> RunHandle {
    let spec = RunSpec::builder()
        .name("test-root")
        .inputs(json!({}))
        .session_name("evaluator-tests")
        .build();
    RunHandle::start(service, spec).await.unwrap()
}

fn request() -> GradeRequest {
    GradeRequest {
        input: "What is the capital of Australia?".to_string(),
        prediction: "Canberra".to_string(),
        reference: "Canberra".to_string(),
    }
}

#[rstest]
#[case::qa(EvaluatorConfig::new(EvaluatorKind::Qa), "qa")]
#[case::cot_qa(EvaluatorConfig::new(EvaluatorKind::CotQa), "cot_qa")]
#[case::labeled_criteria(
    EvaluatorConfig::with_criteria(EvaluatorKind::LabeledCriteria, "correctness"),
    "labeled_criteria"
)]
fn loader_produces_the_named_strategy(#[case] config: EvaluatorConfig, #[case] expected: &str) {
    let provider = Arc::new(ScriptedProvider::canned(["CORRECT"]));
    let strategy = load_evaluator(&config, lm_with(provider)).unwrap();
    assert_eq!(strategy.name(), expected);
}

#[rstest]
fn labeled_criteria_without_criteria_fails_to_load() {
    let provider = Arc::new(ScriptedProvider::canned(["Y"]));
    let config = EvaluatorConfig::new(EvaluatorKind::LabeledCriteria);
    let err = load_evaluator(&config, lm_with(provider)).unwrap_err();
    assert!(matches!(err, LoadError::MissingCriteria));
}

#[rstest]
fn unknown_criterion_fails_to_load() {
    let provider = Arc::new(ScriptedProvider::canned(["Y"]));
    let config = EvaluatorConfig::with_criteria(EvaluatorKind::LabeledCriteria, "vibes");
    let err = load_evaluator(&config, lm_with(provider)).unwrap_err();
    assert!(matches!(err, LoadError::UnknownCriterion { name } if name == "vibes"));
}

#[tokio::test]
async fn qa_grader_parses_bare_verdicts() {
    let service = Arc::new(InMemoryService::new());
    let provider = Arc::new(ScriptedProvider::canned(["CORRECT", "INCORRECT"]));
    let strategy = load_evaluator(
        &EvaluatorConfig::new(EvaluatorKind::Qa),
        lm_with(provider.clone()),
    )
    .unwrap();

    let handle = root_handle(service.clone()).await;
    let output = strategy.evaluate_strings(&request(), &handle).await.unwrap();
    assert_eq!(output.score, 1.0);
    assert_eq!(output.value, "CORRECT");
    assert!(output.reasoning.is_none());

    let handle = root_handle(service.clone()).await;
    let output = strategy.evaluate_strings(&request(), &handle).await.unwrap();
    assert_eq!(output.score, 0.0);
    assert_eq!(output.value, "INCORRECT");
}

#[tokio::test]
async fn qa_prompt_carries_all_three_fields() {
    let service = Arc::new(InMemoryService::new());
    let provider = Arc::new(ScriptedProvider::canned(["CORRECT"]));
    let strategy = load_evaluator(
        &EvaluatorConfig::new(EvaluatorKind::Qa),
        lm_with(provider.clone()),
    )
    .unwrap();

    let handle = root_handle(service.clone()).await;
    strategy.evaluate_strings(&request(), &handle).await.unwrap();

    let history = provider.history();
    assert_eq!(history.len(), 1);
    let prompt = history[0].last_content().to_string();
    assert!(prompt.contains("QUESTION: What is the capital of Australia?"));
    assert!(prompt.contains("STUDENT ANSWER: Canberra"));
    assert!(prompt.contains("TRUE ANSWER: Canberra"));
}

#[tokio::test]
async fn cot_qa_grader_keeps_reasoning() {
    let service = Arc::new(InMemoryService::new());
    let provider = Arc::new(ScriptedProvider::canned([
        "The student names the right city.\nGRADE: CORRECT",
    ]));
    let strategy = load_evaluator(
        &EvaluatorConfig::new(EvaluatorKind::CotQa),
        lm_with(provider),
    )
    .unwrap();

    let handle = root_handle(service.clone()).await;
    let output = strategy.evaluate_strings(&request(), &handle).await.unwrap();
    assert_eq!(output.score, 1.0);
    assert_eq!(
        output.reasoning.as_deref(),
        Some("The student names the right city.")
    );
}

#[tokio::test]
async fn criteria_grader_parses_yes_no() {
    let service = Arc::new(InMemoryService::new());
    let provider = Arc::new(ScriptedProvider::canned([
        "The submission is factual and matches the reference.\nY",
        "The submission contradicts the reference.\nN",
    ]));
    let config = EvaluatorConfig::with_criteria(EvaluatorKind::LabeledCriteria, "correctness");
    let strategy = load_evaluator(&config, lm_with(provider.clone())).unwrap();

    let handle = root_handle(service.clone()).await;
    let output = strategy.evaluate_strings(&request(), &handle).await.unwrap();
    assert_eq!(output.score, 1.0);
    assert_eq!(output.value, "Y");

    let handle = root_handle(service.clone()).await;
    let output = strategy.evaluate_strings(&request(), &handle).await.unwrap();
    assert_eq!(output.score, 0.0);
    assert_eq!(output.value, "N");

    let prompt = provider.history()[0].last_content().to_string();
    assert!(prompt.contains("[Criteria]: correctness: Is the submission correct, accurate, and factual?"));
}

#[tokio::test]
async fn unparseable_verdict_is_a_grade_error() {
    let service = Arc::new(InMemoryService::new());
    let provider = Arc::new(ScriptedProvider::canned(["the student did fine I guess"]));
    let strategy = load_evaluator(&EvaluatorConfig::new(EvaluatorKind::Qa), lm_with(provider))
        .unwrap();

    let handle = root_handle(service.clone()).await;
    let err = strategy
        .evaluate_strings(&request(), &handle)
        .await
        .unwrap_err();
    assert!(matches!(err, GradeError::Verdict { .. }));
}

#[tokio::test]
async fn faithful_grader_agrees_with_ground_truth() {
    // Sanity-check the shared test responder against all three formats.
    for kind in [
        EvaluatorKind::Qa,
        EvaluatorKind::CotQa,
        EvaluatorKind::LabeledCriteria,
    ] {
        let service = Arc::new(InMemoryService::new());
        let config = match kind {
            EvaluatorKind::LabeledCriteria => {
                EvaluatorConfig::with_criteria(kind, "correctness")
            }
            _ => EvaluatorConfig::new(kind),
        };
        let strategy = load_evaluator(&config, lm_with(faithful_grader(kind))).unwrap();

        let handle = root_handle(service.clone()).await;
        let matching = strategy.evaluate_strings(&request(), &handle).await.unwrap();
        assert_eq!(matching.score, 1.0, "kind {kind} should grade a match as 1");

        let mismatched = GradeRequest {
            prediction: "Sydney".to_string(),
            ..request()
        };
        let handle = root_handle(service.clone()).await;
        let output = strategy
            .evaluate_strings(&mismatched, &handle)
            .await
            .unwrap();
        assert_eq!(output.score, 0.0, "kind {kind} should grade a mismatch as 0");
    }
}
