// src/handlers/catalog.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{catalog::QuizCatalog, models::question::PublicQuestion};

/// Lists the countries that have questions.
#[utoipa::path(
    get,
    path = "/api/catalog",
    responses((status = 200, body = Vec<String>)),
    tag = "catalog"
)]
pub async fn list_countries(State(catalog): State<Arc<QuizCatalog>>) -> Json<Vec<String>> {
    Json(catalog.countries().to_vec())
}

/// Lists a country's questions without their answers.
/// Unknown countries return an empty list.
#[utoipa::path(
    get,
    path = "/api/catalog/{country}",
    params(("country" = String, Path, description = "Country name as returned by the geocoder")),
    responses((status = 200, body = Vec<PublicQuestion>)),
    tag = "catalog"
)]
pub async fn get_questions(
    State(catalog): State<Arc<QuizCatalog>>,
    Path(country): Path<String>,
) -> Json<Vec<PublicQuestion>> {
    Json(PublicQuestion::list(catalog.questions_for(&country)))
}
