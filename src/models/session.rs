// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::{
        coordinate::Coordinate,
        question::PublicQuestion,
        score::{AnswerSet, ScoreSummary},
    },
    session::{QuizSession, SessionState},
};

pub const NO_QUESTIONS_MESSAGE: &str = "Não há perguntas disponíveis para este país.";

/// Client-facing rendering of a session state. Expected answers are never included.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStateView {
    Locating,
    Answering {
        country: String,
        questions: Vec<PublicQuestion>,
        answers: AnswerSet,
    },
    Scored {
        country: String,
        summary: ScoreSummary,
    },
    NoQuestionsAvailable {
        country: Option<String>,
        message: String,
    },
}

/// Response body for every session endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub coordinate: Option<Coordinate>,
    pub state: SessionStateView,
}

impl SessionView {
    pub fn new(session: &QuizSession, pass_threshold: f64) -> Self {
        let state = match session.state() {
            SessionState::Locating => SessionStateView::Locating,
            SessionState::Answering {
                country,
                questions,
                answers,
            } => SessionStateView::Answering {
                country: country.clone(),
                questions: PublicQuestion::list(questions),
                answers: answers.clone(),
            },
            SessionState::Scored { country, result } => SessionStateView::Scored {
                country: country.clone(),
                summary: ScoreSummary::new(result, pass_threshold),
            },
            SessionState::NoQuestionsAvailable { country } => {
                SessionStateView::NoQuestionsAvailable {
                    country: country.clone(),
                    message: NO_QUESTIONS_MESSAGE.to_string(),
                }
            }
        };

        Self {
            id: session.id,
            created_at: session.created_at,
            coordinate: session.coordinate(),
            state,
        }
    }
}
