// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{distractor, question, submission},
    state::AppState,
};

/// Builds the CORS layer from the configured allow-list.
/// Credentials are allowed, so origins, methods and headers are explicit.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Assembles the application router.
///
/// * Every endpoint lives under `/api/questions`.
/// * Applies global middleware (Trace, CORS).
/// * Injects the application state.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let question_routes = Router::new()
        .route("/create/question", post(question::create_question))
        .route("/questions-by-chapter", get(question::questions_by_chapter))
        .route("/chapter/{chapter_number}", get(question::questions_in_chapter))
        .route(
            "/chapter/{chapter_id}/problem/{problem_id}",
            get(question::get_question),
        )
        .route("/submit", post(submission::submit_answer))
        .route("/submissions", get(submission::submissions_by_chapter))
        .route(
            "/delete/submissions",
            delete(submission::delete_submissions_by_chapter),
        )
        .route("/get/all/distractors", get(distractor::list_distractors))
        .route(
            "/{problem_id}",
            put(question::update_question).delete(question::delete_question),
        );

    Router::new()
        .nest("/api/questions", question_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
