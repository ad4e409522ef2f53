//! Job queue client implementation.

use std::fmt;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::backend::SummaryBackend;
use crate::error::JobQueueError;
use crate::queue::{pending_queue, PendingQueue};
use crate::store::JobStore;
use crate::types::{Job, JobInput, JobView, QueueStats};
use crate::worker::QueueWorker;

/// The models and summary modes a queue accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSettings {
    pub models: Vec<String>,
    pub modes: Vec<String>,
}

impl QueueSettings {
    pub fn new<M, S>(models: M, modes: S) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            modes: modes.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject input the backend could never serve.
    pub fn validate(&self, input: &JobInput) -> Result<(), JobQueueError> {
        if input.text.trim().is_empty() {
            return Err(JobQueueError::EmptyText);
        }
        if !self.models.iter().any(|m| *m == input.model) {
            return Err(JobQueueError::UnknownModel {
                model: input.model.clone(),
                available: self.models.clone(),
            });
        }
        if !self.modes.iter().any(|m| *m == input.mode) {
            return Err(JobQueueError::UnknownMode {
                mode: input.mode.clone(),
                available: self.modes.clone(),
            });
        }
        Ok(())
    }
}

/// Interface for submitting summarization jobs and polling their state.
///
/// Cloning is cheap; all clones share one store and one worker.
#[derive(Clone)]
pub struct JobQueueClient {
    settings: Arc<QueueSettings>,
    store: JobStore,
    pending: PendingQueue,
}

impl fmt::Debug for JobQueueClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobQueueClient")
            .field("settings", &self.settings)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl JobQueueClient {
    /// Build a client together with the worker that will serve it.
    ///
    /// Nothing is processed until the worker is spawned.
    pub fn new(settings: QueueSettings) -> (Self, QueueWorker) {
        let store = JobStore::new();
        let (pending, receiver) = pending_queue();
        let client = Self {
            settings: Arc::new(settings),
            store: store.clone(),
            pending,
        };
        (client, QueueWorker::new(store, receiver))
    }

    /// Build a client and spawn its worker on the current runtime.
    pub fn start(settings: QueueSettings, backend: Arc<dyn SummaryBackend>) -> Self {
        let (client, worker) = Self::new(settings);
        worker.spawn(backend);
        client
    }

    #[inline]
    pub fn settings(&self) -> &QueueSettings {
        &self.settings
    }

    /// Add a job to the queue and return its id without waiting for it to run.
    pub async fn submit(
        &self,
        text: impl Into<String>,
        model: impl Into<String>,
        mode: impl Into<String>,
    ) -> Result<Uuid, JobQueueError> {
        let input = JobInput::new(text, model, mode);
        self.settings.validate(&input)?;

        let job = Job::new(input);
        let id = job.id();
        let (model, mode) = (job.input().model.clone(), job.input().mode.clone());

        self.store.insert(job).await?;
        if let Err(e) = self.pending.enqueue(id) {
            self.store.remove(&id).await;
            return Err(e);
        }

        info!(job_id = %id, model = %model, mode = %mode, "job queued");
        Ok(id)
    }

    /// Current state of a job.
    pub async fn get_status(&self, id: Uuid) -> Result<JobView, JobQueueError> {
        self.store
            .get(&id)
            .await
            .ok_or(JobQueueError::NotFound(id))
    }

    /// Queue-level statistics.
    ///
    /// Status counts come from one store snapshot; `pending` is read
    /// separately and may be off by one under concurrent activity.
    pub async fn get_stats(&self) -> QueueStats {
        let statuses = self.store.snapshot_statuses().await;
        QueueStats::from_statuses(self.pending.len(), &statuses)
    }

    /// List jobs, most recent first.
    pub async fn list_jobs(&self, limit: usize, offset: usize) -> Vec<JobView> {
        self.store.list_recent(limit, offset).await
    }

    pub async fn count_jobs(&self) -> usize {
        self.store.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> QueueSettings {
        QueueSettings::new(["llama3.2", "phi3"], ["comprehensive", "executive"])
    }

    #[tokio::test]
    async fn validation_happens_before_a_job_exists() {
        let (client, _worker) = JobQueueClient::new(settings());

        let err = client
            .submit("   ", "llama3.2", "comprehensive")
            .await
            .unwrap_err();
        assert!(matches!(err, JobQueueError::EmptyText));

        let err = client
            .submit("text", "gpt-9", "comprehensive")
            .await
            .unwrap_err();
        assert!(matches!(err, JobQueueError::UnknownModel { ref model, .. } if model == "gpt-9"));
        assert!(err.is_validation());

        let err = client.submit("text", "phi3", "haiku").await.unwrap_err();
        assert!(matches!(err, JobQueueError::UnknownMode { ref mode, .. } if mode == "haiku"));

        assert_eq!(client.count_jobs().await, 0);
        assert_eq!(client.get_stats().await, QueueStats::default());
    }

    #[tokio::test]
    async fn submit_is_visible_immediately() {
        let (client, _worker) = JobQueueClient::new(settings());
        let id = client
            .submit("a document", "phi3", "executive")
            .await
            .unwrap();

        let view = client.get_status(id).await.unwrap();
        assert_eq!(view.status, crate::JobStatus::Queued);
        assert_eq!(view.model, "phi3");
        assert_eq!(view.summary_type, "executive");

        let stats = client.get_stats().await;
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.queued, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (client, _worker) = JobQueueClient::new(settings());
        let id = Uuid::new_v4();
        let err = client.get_status(id).await.unwrap_err();
        assert!(matches!(err, JobQueueError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn submit_fails_once_worker_is_gone() {
        let (client, worker) = JobQueueClient::new(settings());
        drop(worker);

        let err = client
            .submit("text", "phi3", "executive")
            .await
            .unwrap_err();
        assert!(matches!(err, JobQueueError::WorkerStopped));
        assert_eq!(client.count_jobs().await, 0);
    }
}
