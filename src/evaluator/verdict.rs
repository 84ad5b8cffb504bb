use crate::core::VerdictError;

/// Finds the last `CORRECT`/`INCORRECT` token in `text`.
///
/// Scans alphabetic tokens so `INCORRECT` is never misread as `CORRECT`, and
/// later verdicts override earlier ones (chain-of-thought graders sometimes
/// restate the rubric before the final grade).
pub(crate) fn parse_correct_incorrect(text: &str) -> Result<f64, VerdictError> {
    let mut verdict = None;
    for token in text.split(|c: char| !c.is_ascii_alphabetic()) {
        match token {
            "CORRECT" => verdict = Some(1.0),
            "INCORRECT" => verdict = Some(0.0),
            _ => {}
        }
    }
    verdict.ok_or(VerdictError::Missing {
        expected: "CORRECT/INCORRECT",
    })
}

/// Parses a chain-of-thought grading response: verdict on the last `GRADE:`
/// line, everything before it kept as reasoning.
pub(crate) fn parse_graded(text: &str) -> Result<(f64, Option<String>), VerdictError> {
    let lines: Vec<&str> = text.lines().collect();
    for (idx, line) in lines.iter().enumerate().rev() {
        if let Some((_, rest)) = line.split_once("GRADE:") {
            let score = parse_correct_incorrect(rest)?;
            let reasoning = lines[..idx].join("\n").trim().to_string();
            return Ok((score, (!reasoning.is_empty()).then_some(reasoning)));
        }
    }
    // No GRADE: line; fall back to a whole-text scan with no reasoning split.
    let score = parse_correct_incorrect(text)?;
    Ok((score, None))
}

/// Finds the last standalone `Y`/`N` (or `YES`/`NO`) token in `text`.
pub(crate) fn parse_yes_no(text: &str) -> Result<f64, VerdictError> {
    let mut verdict = None;
    for token in text.split(|c: char| !c.is_ascii_alphabetic()) {
        match token {
            "Y" | "YES" => verdict = Some(1.0),
            "N" | "NO" => verdict = Some(0.0),
            _ => {}
        }
    }
    verdict.ok_or(VerdictError::Missing { expected: "Y/N" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_incorrect_takes_last_token() {
        assert_eq!(
            parse_correct_incorrect("CORRECT or INCORRECT? INCORRECT").unwrap(),
            0.0
        );
        assert_eq!(parse_correct_incorrect("GRADE: CORRECT").unwrap(), 1.0);
    }

    #[test]
    fn incorrect_is_not_misread_as_correct() {
        assert_eq!(parse_correct_incorrect("INCORRECT").unwrap(), 0.0);
    }

    #[test]
    fn missing_verdict_is_an_error() {
        assert!(parse_correct_incorrect("the student did well").is_err());
    }

    #[test]
    fn graded_splits_reasoning_from_verdict() {
        let (score, reasoning) =
            parse_graded("The answer matches the reference.\nGRADE: CORRECT").unwrap();
        assert_eq!(score, 1.0);
        assert_eq!(
            reasoning.as_deref(),
            Some("The answer matches the reference.")
        );
    }

    #[test]
    fn graded_without_grade_line_falls_back() {
        let (score, reasoning) = parse_graded("INCORRECT").unwrap();
        assert_eq!(score, 0.0);
        assert!(reasoning.is_none());
    }

    #[test]
    fn yes_no_takes_last_token() {
        assert_eq!(parse_yes_no("The submission is factual.\nY").unwrap(), 1.0);
        assert_eq!(parse_yes_no("N").unwrap(), 0.0);
        assert!(parse_yes_no("maybe").is_err());
    }
}
