// src/session.rs

//! One quiz session, from locating the device to the final score.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    catalog::QuizCatalog,
    location::Location,
    models::{
        coordinate::Coordinate,
        question::Question,
        score::{AnswerSet, ScoreResult},
    },
    scorer,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    #[error("answer index {index} is out of range for {len} questions")]
    AnswerIndexOutOfRange { index: usize, len: usize },

    #[error("expected {expected} answers, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },
}

/// Where a session is. Transitions only move forward:
/// `Locating -> Answering -> Scored`, or `Locating -> NoQuestionsAvailable`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Locating,
    Answering {
        country: String,
        questions: Vec<Question>,
        answers: AnswerSet,
    },
    Scored {
        country: String,
        result: ScoreResult,
    },
    /// The country is unknown or has no questions. The two causes are not
    /// told apart to the user.
    NoQuestionsAvailable { country: Option<String> },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Locating => "locating",
            SessionState::Answering { .. } => "answering",
            SessionState::Scored { .. } => "scored",
            SessionState::NoQuestionsAvailable { .. } => "no_questions_available",
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    coordinate: Option<Coordinate>,
    state: SessionState,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            coordinate: None,
            state: SessionState::Locating,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// Leaves `Locating` with the resolved location.
    pub fn locate(&mut self, location: Location, catalog: &QuizCatalog) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::Locating) {
            return Err(SessionError::InvalidTransition {
                state: self.state.name(),
                action: "locate",
            });
        }

        self.coordinate = Some(location.coordinate);

        let questions = location
            .country
            .as_deref()
            .map(|country| catalog.questions_for(country))
            .unwrap_or(&[]);

        self.state = match location.country {
            Some(country) if !questions.is_empty() => SessionState::Answering {
                answers: AnswerSet::new(questions.len()),
                questions: questions.to_vec(),
                country,
            },
            country => SessionState::NoQuestionsAvailable { country },
        };

        tracing::debug!("Session {} is now {}", self.id, self.state.name());
        Ok(())
    }

    /// Fills one answer slot.
    pub fn answer(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        let state = self.state.name();
        let SessionState::Answering { answers, .. } = &mut self.state else {
            return Err(SessionError::InvalidTransition {
                state,
                action: "answer",
            });
        };

        let len = answers.len();
        if !answers.set(index, text) {
            return Err(SessionError::AnswerIndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Freezes the answers and scores them.
    ///
    /// `replacement`, when given, must hold one answer per question and
    /// overrides everything filled in so far.
    pub fn submit(&mut self, replacement: Option<Vec<String>>) -> Result<ScoreResult, SessionError> {
        let state = self.state.name();
        let SessionState::Answering {
            country,
            questions,
            answers,
        } = &mut self.state
        else {
            return Err(SessionError::InvalidTransition {
                state,
                action: "submit",
            });
        };

        if let Some(replacement) = replacement {
            if replacement.len() != questions.len() {
                return Err(SessionError::AnswerCountMismatch {
                    expected: questions.len(),
                    got: replacement.len(),
                });
            }
            *answers = AnswerSet::from(replacement);
        }

        let result = scorer::score(questions, answers.as_slice());
        tracing::info!(
            "Session {} scored {}/{} for {}",
            self.id,
            result.correct,
            result.total,
            country
        );

        let country = std::mem::take(country);
        self.state = SessionState::Scored { country, result };
        Ok(result)
    }
}
