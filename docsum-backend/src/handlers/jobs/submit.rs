use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::Extension;
use axum::Json;
use docsum_job_queue::JobStatus;
use tracing::debug;

use super::dto::{SummarizeRequest, SummarizeResponse};
use crate::{error::ApiError, state::AppState};

/// POST /summarize
/// Queue a document and return its job id without waiting for the summary.
pub async fn submit(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let model = request
        .model_name
        .unwrap_or_else(|| state.defaults.model.clone());
    let mode = request
        .summary_type
        .unwrap_or_else(|| state.defaults.mode.clone());
    debug!(chars = request.text.len(), %model, %mode, "summarize request");

    let job_id = state.job_queue.submit(request.text, model, mode).await?;

    Ok(Json(SummarizeResponse {
        job_id,
        status: JobStatus::Queued.as_str(),
    }))
}
