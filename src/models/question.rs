// src/models/question.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    /// The text shown to the user.
    pub question: String,

    /// The expected free-text answer.
    pub answer: String,
}

impl Question {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PublicQuestion {
    /// Position in the country's question list; answers are index-aligned to it.
    pub index: usize,
    pub question: String,
}

impl PublicQuestion {
    pub fn list(questions: &[Question]) -> Vec<PublicQuestion> {
        questions
            .iter()
            .enumerate()
            .map(|(index, q)| PublicQuestion {
                index,
                question: q.question.clone(),
            })
            .collect()
    }
}
