use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /models
/// Configured models and whether each one is pulled in Ollama.
pub async fn list(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let models = state.ollama.model_readiness(state.models()).await;
    Json(json!({ "models": models }))
}
