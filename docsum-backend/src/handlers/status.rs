use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use docsum_job_queue::QueueStats;

use crate::state::AppState;

/// GET /status
pub async fn status(Extension(state): Extension<Arc<AppState>>) -> Json<QueueStats> {
    Json(state.job_queue.get_stats().await)
}
