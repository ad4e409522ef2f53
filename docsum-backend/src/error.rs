use axum::{http::StatusCode, response::IntoResponse, Json};
use docsum_job_queue::JobQueueError;
use serde_json::json;
use thiserror::Error;

use crate::validation::{to_payload, ValidationIssue};

/// Error type shared by all route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation error")]
    Validation(serde_json::Value),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = match self {
            ApiError::Validation(v) => v,
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(payload)).into_response()
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// 404 for a job id that was never issued.
    pub fn job_not_found(job_id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Job '{job_id}' not found."))
    }
}

impl From<JobQueueError> for ApiError {
    fn from(err: JobQueueError) -> Self {
        let issue = match &err {
            JobQueueError::EmptyText => ValidationIssue::new("text", "empty", "Text cannot be empty."),
            JobQueueError::UnknownModel { available, .. } => ValidationIssue::new(
                "model_name",
                "unknown_model",
                format!("Unknown model. Choose from: {}", available.join(", ")),
            ),
            JobQueueError::UnknownMode { available, .. } => ValidationIssue::new(
                "summary_type",
                "unknown_summary_type",
                format!("Unknown summary type. Choose from: {}", available.join(", ")),
            ),
            JobQueueError::NotFound(id) => return Self::job_not_found(id),
            JobQueueError::WorkerStopped => return Self::Unavailable(err.to_string()),
            JobQueueError::DuplicateId(_) | JobQueueError::InvalidTransition { .. } => {
                return Self::Unexpected(err.to_string())
            }
        };
        Self::Validation(to_payload(&[issue]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn queue_errors_map_to_statuses() {
        let cases = [
            (JobQueueError::EmptyText, StatusCode::BAD_REQUEST),
            (
                JobQueueError::UnknownModel {
                    model: "x".into(),
                    available: vec!["phi3".into()],
                },
                StatusCode::BAD_REQUEST,
            ),
            (JobQueueError::NotFound(Uuid::new_v4()), StatusCode::NOT_FOUND),
            (JobQueueError::WorkerStopped, StatusCode::SERVICE_UNAVAILABLE),
            (JobQueueError::DuplicateId(Uuid::new_v4()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
