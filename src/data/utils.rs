use crate::Example;

/// Builds a synthetic arithmetic Q&A benchmark of `count` examples.
///
/// With `correct == true` every prediction equals the reference answer and the
/// ground-truth label is `1.0`; otherwise every prediction is off by one and
/// the label is `0.0`. Used to seed in-memory datasets for hermetic runs.
pub fn synthetic_qa_examples(count: usize, correct: bool) -> Vec<Example> {
    (0..count)
        .map(|i| {
            let a = i;
            let b = i + 3;
            let answer = (a + b).to_string();
            let prediction = if correct {
                answer.clone()
            } else {
                (a + b + 1).to_string()
            };
            let label = if correct { 1.0 } else { 0.0 };
            Example::new(format!("What is {a} + {b}?"), prediction, answer, label)
        })
        .collect()
}
