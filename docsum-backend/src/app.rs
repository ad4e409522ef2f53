use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

// Request bodies carry extracted plain text only.
const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the axum router with the provided shared application state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/models", get(handlers::models::list))
        .route("/summarize", post(handlers::jobs::submit::submit))
        .route("/job/{job_id}", get(handlers::jobs::get::get))
        .route("/jobs", get(handlers::jobs::list::list))
        .route("/status", get(handlers::status::status))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
