//! HTTP API server for curricula.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod response_types;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use curricula_service::CurriculumService;

pub use response_types::{StatusResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// Parse, generate and persistence operations
    pub curriculum_service: Arc<CurriculumService>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/curriculum/parse", post(handlers::analysis::parse_curriculum))
        .route("/test/generate", post(handlers::analysis::generate_test))
        .route(
            "/curricula",
            post(handlers::curricula::create_curriculum).get(handlers::curricula::list_curricula),
        )
        .route("/curricula/{id}", get(handlers::curricula::get_curriculum))
        .route("/curricula/{id}/versions", post(handlers::curricula::add_version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
