//! Error types for the job queue system.

use thiserror::Error;
use uuid::Uuid;

use crate::types::JobStatus;

/// Errors surfaced by the queue facade and the job state machine.
#[derive(Debug, Error)]
pub enum JobQueueError {
    #[error("text cannot be empty")]
    EmptyText,

    #[error("unknown model '{model}', choose from: {}", available.join(", "))]
    UnknownModel {
        model: String,
        available: Vec<String>,
    },

    #[error("unknown summary type '{mode}', choose from: {}", available.join(", "))]
    UnknownMode {
        mode: String,
        available: Vec<String>,
    },

    #[error("job not found: {0}")]
    NotFound(Uuid),

    #[error("job id already in use: {0}")]
    DuplicateId(Uuid),

    #[error("invalid job transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    #[error("queue worker is not running")]
    WorkerStopped,
}

impl JobQueueError {
    /// Whether this error was caused by the submitted input rather than the queue.
    #[inline]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::UnknownModel { .. } | Self::UnknownMode { .. }
        )
    }
}

/// Failures reported by a [`SummaryBackend`](crate::SummaryBackend) call.
///
/// These never escape the worker loop; they become the `error` of a failed job.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Timeout(String),

    #[error("backend returned an empty response")]
    EmptyResult,

    #[error("backend request failed: {0}")]
    Http(String),

    #[error("backend call panicked: {0}")]
    Panicked(String),
}
