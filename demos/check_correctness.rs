/*
Runs the correctness meta-evaluation against the remote eval service.

Needs METAEVAL_API_URL, METAEVAL_API_KEY, and OPENAI_API_KEY set.

Run with:
```
cargo run --example check-correctness
```
*/

use anyhow::Result;
use std::sync::Arc;

use metaeval::{
    EvaluatorConfig, EvaluatorKind, LM, LMConfig, RemoteClient, check_dataset, init_tracing,
    session_uid,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let service = Arc::new(RemoteClient::from_env()?);
    let lm = LM::openai_from_env(LMConfig::default())?;
    let uid = session_uid();

    let configs = [
        EvaluatorConfig::new(EvaluatorKind::CotQa),
        EvaluatorConfig::new(EvaluatorKind::Qa),
        EvaluatorConfig::with_criteria(EvaluatorKind::LabeledCriteria, "correctness"),
    ];

    for config in configs {
        let project_name = format!("{} - int test - correctness - {uid}", config.evaluator);
        let score = check_dataset(
            service.clone(),
            lm.clone(),
            &config,
            "Web Q&A Dataset - Correct",
            &project_name,
            vec!["check_correctness".to_string()],
        )
        .await?;
        println!("{}: mean exact-score match {score:.3}", config.evaluator);
    }

    Ok(())
}
