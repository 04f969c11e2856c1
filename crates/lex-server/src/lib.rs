//! # lex-server
//!
//! The `lexd` HTTP API: authentication, customers, petitions, background
//! generation jobs, and `.docx` downloads.
//!
//! Handlers are thin: they authenticate, validate input, call `LexService`
//! and translate errors into [`ApiError`] responses.

pub mod api;
pub mod error;
pub mod extract;
pub mod jobs;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Assemble every route over the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/auth/signup", post(api::auth::signup))
        .route("/api/auth/login", post(api::auth::login))
        .route("/api/auth/logout", post(api::auth::logout))
        .route("/api/auth/session", get(api::auth::session))
        .route(
            "/api/customers",
            get(api::customers::list).post(api::customers::create),
        )
        .route(
            "/api/petitions",
            get(api::petitions::list).post(api::petitions::create),
        )
        .route("/api/petitions/generate", post(api::generation::start))
        .route("/api/petitions/generate/{job_id}", get(api::generation::status))
        .route(
            "/api/petitions/{id}",
            get(api::petitions::get)
                .put(api::petitions::update)
                .delete(api::petitions::delete),
        )
        .route("/api/petitions/{id}/download", get(api::petitions::download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
