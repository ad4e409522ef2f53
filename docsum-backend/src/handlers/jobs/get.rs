use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::Json;
use docsum_job_queue::JobView;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// GET /job/{job_id}
/// Poll the status and result of a submitted job.
pub async fn get(
    Extension(state): Extension<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobView>, ApiError> {
    // A malformed id can never have been issued.
    let id = Uuid::parse_str(&job_id).map_err(|_| ApiError::job_not_found(&job_id))?;
    let view = state.job_queue.get_status(id).await?;
    Ok(Json(view))
}
