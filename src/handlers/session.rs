// src/handlers/session.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    location::{positioning::ReportedPositioning, resolve_location},
    models::{
        coordinate::LocateRequest,
        score::{AnswerRequest, ScoreSummary, SubmitAnswersRequest},
        session::SessionView,
    },
    session::{QuizSession, SessionState},
    state::{AppState, SessionStore},
};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {} not found", id))
}

/// Opens a quiz session.
///
/// * Treats a request without coordinates as a denied location permission (403).
/// * Resolves the country once; geocoder failures end up as "no questions".
/// * Returns the questions (without answers) when the catalog has any.
/// * Only sessions with questions are kept; a "no questions" view is final.
#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = LocateRequest,
    responses(
        (status = 201, description = "Session opened", body = SessionView),
        (status = 400, description = "Invalid coordinates"),
        (status = 403, description = "Location permission denied")
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<LocateRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;
    let coordinate = req
        .coordinate()
        .map_err(|msg| AppError::BadRequest(msg.to_string()))?;

    let positioning = ReportedPositioning::from(coordinate);
    let location = resolve_location(&positioning, state.resolver.as_ref()).await?;

    let mut session = QuizSession::new();
    session.locate(location, &state.catalog)?;

    let view = SessionView::new(&session, state.config.pass_threshold);

    // A session without questions cannot move on; the view already says so.
    if matches!(session.state(), SessionState::Answering { .. }) {
        state.sessions.insert(session).await;
    }

    Ok((StatusCode::CREATED, Json(view)))
}

/// Retrieves a session.
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, body = SessionView),
        (status = 404, description = "Unknown session")
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(sessions): State<SessionStore>,
    State(config): State<Config>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = sessions.get(id).await.ok_or_else(|| not_found(id))?;
    Ok(Json(SessionView::new(&session, config.pass_threshold)))
}

/// Fills in the answer for one question.
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/answers/{index}",
    params(
        ("id" = Uuid, Path, description = "Session id"),
        ("index" = usize, Path, description = "Question index")
    ),
    request_body = AnswerRequest,
    responses(
        (status = 200, body = SessionView),
        (status = 400, description = "Index out of range or answer too long"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Session is not answering")
    ),
    tag = "sessions"
)]
pub async fn put_answer(
    State(sessions): State<SessionStore>,
    State(config): State<Config>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let view = sessions
        .update(id, |session| {
            session
                .answer(index, req.answer)
                .map(|_| SessionView::new(session, config.pass_threshold))
        })
        .await
        .ok_or_else(|| not_found(id))??;

    Ok(Json(view))
}

/// Submits the session's answers and returns the score.
///
/// * Uses the `answers` list from the body when present, otherwise the
///   answers filled in so far.
/// * The session stays readable as `scored` until it is deleted.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/submit",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = SubmitAnswersRequest,
    responses(
        (status = 200, body = ScoreSummary),
        (status = 400, description = "Wrong number of answers"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Session is not answering")
    ),
    tag = "sessions"
)]
pub async fn submit_answers(
    State(sessions): State<SessionStore>,
    State(config): State<Config>,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let result = sessions
        .update(id, |session| session.submit(req.answers))
        .await
        .ok_or_else(|| not_found(id))??;

    Ok(Json(ScoreSummary::new(&result, config.pass_threshold)))
}

/// Discards a session and its answers.
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "Unknown session")
    ),
    tag = "sessions"
)]
pub async fn delete_session(
    State(sessions): State<SessionStore>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    sessions.remove(id).await.ok_or_else(|| not_found(id))?;
    tracing::debug!("Session {} discarded, {} still open", id, sessions.len().await);
    Ok(StatusCode::NO_CONTENT)
}
