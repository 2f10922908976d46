// src/scorer.rs

//! Free-text answer comparison.

use crate::models::{question::Question, score::ScoreResult};

/// Default fraction of correct answers needed to pass.
pub const DEFAULT_PASS_THRESHOLD: f64 = 0.7;

const PASSED_VERDICT: &str = "Parabéns! Você se saiu bem!";
const FAILED_VERDICT: &str = "Tente novamente!";

/// Scores `answers` against `questions`, index by index.
///
/// An answer is correct when it equals the expected answer after trimming
/// surrounding whitespace and lowercasing both sides. Missing slots count as
/// empty answers and surplus answers are ignored, so the result is defined
/// for any input and `correct <= total` always holds.
pub fn score(questions: &[Question], answers: &[String]) -> ScoreResult {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(index, question)| {
            let given = answers.get(*index).map(String::as_str).unwrap_or("");
            is_correct(given, &question.answer)
        })
        .count();

    ScoreResult {
        correct,
        total: questions.len(),
    }
}

fn is_correct(given: &str, expected: &str) -> bool {
    normalize(given) == normalize(expected)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Short encouragement shown under the score.
pub fn verdict(result: &ScoreResult, pass_threshold: f64) -> &'static str {
    if result.passed(pass_threshold) {
        PASSED_VERDICT
    } else {
        FAILED_VERDICT
    }
}

pub fn summary_message(result: &ScoreResult) -> String {
    format!(
        "Você acertou {} de {} perguntas.",
        result.correct, result.total
    )
}
