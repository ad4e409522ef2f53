//! Core types for the job queue system.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BackendError, JobQueueError};

/// Lifecycle state of a summarization job.
///
/// `Queued -> Processing -> Completed | Failed`. Terminal states never change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        Self::Queued,
        Self::Processing,
        Self::Completed,
        Self::Failed,
    ];

    /// Returns true if this status represents a terminal state.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    #[inline]
    pub const fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (Self::Queued, Self::Processing)
                | (Self::Processing, Self::Completed)
                | (Self::Processing, Self::Failed)
        )
    }

    /// Wire name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The immutable request payload of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInput {
    pub text: String,
    pub model: String,
    pub mode: String,
}

impl JobInput {
    #[inline]
    pub fn new(text: impl Into<String>, model: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            mode: mode.into(),
        }
    }
}

/// A summarization request plus its lifecycle state.
///
/// Fields are private so every status change goes through a checked
/// transition.
#[derive(Debug, Clone)]
pub struct Job {
    id: Uuid,
    input: Arc<JobInput>,
    status: JobStatus,
    result: Option<String>,
    error: Option<String>,
    elapsed: Option<Duration>,
    submitted_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a new queued job with a fresh identifier.
    #[inline]
    pub fn new(input: JobInput) -> Self {
        Self::with_id(Uuid::new_v4(), input)
    }

    /// Create a new queued job with a specific identifier.
    pub fn with_id(id: Uuid, input: JobInput) -> Self {
        Self {
            id,
            input: Arc::new(input),
            status: JobStatus::Queued,
            result: None,
            error: None,
            elapsed: None,
            submitted_at: Utc::now(),
            completed_at: None,
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn input(&self) -> &Arc<JobInput> {
        &self.input
    }

    #[inline]
    pub fn status(&self) -> JobStatus {
        self.status
    }

    #[inline]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    #[inline]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[inline]
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    #[inline]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    #[inline]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    fn transition(&mut self, to: JobStatus) -> Result<(), JobQueueError> {
        if !self.status.can_transition_to(to) {
            return Err(JobQueueError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Mark the job as picked up by the worker.
    pub fn start(&mut self) -> Result<(), JobQueueError> {
        self.transition(JobStatus::Processing)
    }

    /// Mark the job as completed with the generated summary.
    pub fn complete(&mut self, summary: String, elapsed: Duration) -> Result<(), JobQueueError> {
        self.transition(JobStatus::Completed)?;
        self.result = Some(summary);
        self.elapsed = Some(elapsed);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Mark the job as failed with a human-readable message.
    pub fn fail(
        &mut self,
        message: impl Into<String>,
        elapsed: Duration,
    ) -> Result<(), JobQueueError> {
        self.transition(JobStatus::Failed)?;
        self.error = Some(message.into());
        self.elapsed = Some(elapsed);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Record the outcome of a backend call.
    pub fn finish(
        &mut self,
        outcome: Result<String, BackendError>,
        elapsed: Duration,
    ) -> Result<(), JobQueueError> {
        match outcome {
            Ok(summary) => self.complete(summary, elapsed),
            Err(e) => self.fail(e.to_string(), elapsed),
        }
    }

    /// Project the job into its polling shape.
    pub fn view(&self) -> JobView {
        JobView {
            job_id: self.id,
            model: self.input.model.clone(),
            summary_type: self.input.mode.clone(),
            status: self.status,
            summary: self.result.clone(),
            error: self.error.clone(),
            elapsed_seconds: self.elapsed.map(round_secs),
            submitted_at: self.submitted_at,
            completed_at: self.completed_at,
        }
    }
}

/// Seconds rounded to two decimals, the precision reported to pollers.
#[inline]
fn round_secs(d: Duration) -> f64 {
    (d.as_secs_f64() * 100.0).round() / 100.0
}

/// Read-only projection of a job returned to pollers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobView {
    pub job_id: Uuid,
    pub model: String,
    pub summary_type: String,
    pub status: JobStatus,
    pub summary: Option<String>,
    pub error: Option<String>,
    #[serde(rename = "time")]
    pub elapsed_seconds: Option<f64>,
    pub submitted_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Queue-level statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub pending: usize,
    pub total: usize,
    pub queued: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl QueueStats {
    /// Aggregate a status snapshot together with the current queue depth.
    pub fn from_statuses(pending: usize, statuses: &[JobStatus]) -> Self {
        let mut stats = Self {
            pending,
            total: statuses.len(),
            ..Self::default()
        };
        for status in statuses {
            match status {
                JobStatus::Queued => stats.queued += 1,
                JobStatus::Processing => stats.processing += 1,
                JobStatus::Completed => stats.completed += 1,
                JobStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }
}
