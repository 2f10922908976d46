// src/openapi.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{
    handlers::{catalog, session},
    models::{
        coordinate::{Coordinate, LocateRequest},
        question::PublicQuestion,
        score::{AnswerRequest, AnswerSet, ScoreResult, ScoreSummary, SubmitAnswersRequest},
        session::{SessionStateView, SessionView},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "GeoQuiz API", description = "Location-based country quiz"),
    paths(
        session::create_session,
        session::get_session,
        session::put_answer,
        session::submit_answers,
        session::delete_session,
        catalog::list_countries,
        catalog::get_questions,
    ),
    components(schemas(
        Coordinate,
        LocateRequest,
        PublicQuestion,
        AnswerRequest,
        AnswerSet,
        ScoreResult,
        ScoreSummary,
        SubmitAnswersRequest,
        SessionStateView,
        SessionView,
    )),
    tags(
        (name = "sessions", description = "Locate, answer and score"),
        (name = "catalog", description = "Question sets by country")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
