// src/models/score.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::scorer;

/// Longest answer accepted from a client, in characters.
pub const MAX_ANSWER_LEN: u64 = 500;

/// The user's answers, one slot per question, index-aligned.
/// Slots start out as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AnswerSet(Vec<String>);

impl AnswerSet {
    /// Creates an answer set with `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self(vec![String::new(); len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrites one slot. Returns `false` (and changes nothing) when
    /// `index` is outside the set.
    pub fn set(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for AnswerSet {
    fn from(answers: Vec<String>) -> Self {
        Self(answers)
    }
}

/// Outcome of scoring one answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreResult {
    pub correct: usize,
    pub total: usize,
}

impl ScoreResult {
    /// Fraction of correct answers, or `None` when there were no questions.
    pub fn ratio(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.correct as f64 / self.total as f64)
    }

    /// Whether the ratio reaches `threshold`. Never true with zero questions.
    pub fn passed(&self, threshold: f64) -> bool {
        self.ratio().is_some_and(|ratio| ratio >= threshold)
    }
}

/// DTO for filling in a single answer slot.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnswerRequest {
    #[validate(length(max = MAX_ANSWER_LEN))]
    pub answer: String,
}

/// DTO for submitting a session.
///
/// When `answers` is present it replaces the whole answer set and must have
/// one entry per question. When absent, the answers filled in so far are scored.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct SubmitAnswersRequest {
    #[validate(custom(function = validate_answers))]
    pub answers: Option<Vec<String>>,
}

fn validate_answers(answers: &[String]) -> Result<(), validator::ValidationError> {
    for answer in answers {
        if answer.chars().count() as u64 > MAX_ANSWER_LEN {
            return Err(validator::ValidationError::new("answer_too_long"));
        }
    }
    Ok(())
}

/// Response for the results screen.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
    /// `null` when the country had no questions.
    pub ratio: Option<f64>,
    pub passed: bool,
    pub message: String,
    pub verdict: String,
}

impl ScoreSummary {
    pub fn new(result: &ScoreResult, pass_threshold: f64) -> Self {
        Self {
            correct: result.correct,
            total: result.total,
            ratio: result.ratio(),
            passed: result.passed(pass_threshold),
            message: scorer::summary_message(result),
            verdict: scorer::verdict(result, pass_threshold).to_string(),
        }
    }
}
