// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{catalog, session},
    openapi,
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the session and catalog sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (catalog, geocoder, sessions).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let session_routes = Router::new()
        .route("/", post(session::create_session))
        .route(
            "/{id}",
            get(session::get_session).delete(session::delete_session),
        )
        .route("/{id}/answers/{index}", put(session::put_answer))
        .route("/{id}/submit", post(session::submit_answers));

    let catalog_routes = Router::new()
        .route("/", get(catalog::list_countries))
        .route("/{country}", get(catalog::get_questions));

    Router::new()
        .nest("/api/sessions", session_routes)
        .nest("/api/catalog", catalog_routes)
        .route("/api/openapi.json", get(openapi::openapi_json))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
