//! Concurrent job storage.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::JobQueueError;
use crate::types::{Job, JobStatus, JobView};

/// Internal storage optimized for both iteration and lookup by ID.
#[derive(Debug, Default)]
struct JobStoreState {
    /// Job IDs in submission order (oldest first).
    order: Vec<Uuid>,
    jobs: HashMap<Uuid, Job>,
}

/// Shared mapping from job identifier to [`Job`].
///
/// Readers take the shared lock; the worker mutates a job under the exclusive
/// lock, so a reader never sees a half-applied transition. Jobs are kept for
/// the lifetime of the store.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    state: Arc<RwLock<JobStoreState>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new job. Identifiers are never reused.
    pub async fn insert(&self, job: Job) -> Result<(), JobQueueError> {
        let id = job.id();
        let mut state = self.state.write().await;
        if state.jobs.contains_key(&id) {
            return Err(JobQueueError::DuplicateId(id));
        }
        state.jobs.insert(id, job);
        state.order.push(id);
        Ok(())
    }

    /// Drop a job that never reached the worker.
    pub(crate) async fn remove(&self, id: &Uuid) -> Option<Job> {
        let mut state = self.state.write().await;
        let job = state.jobs.remove(id)?;
        state.order.retain(|other| other != id);
        Some(job)
    }

    /// Look up the current projection of a job.
    pub async fn get(&self, id: &Uuid) -> Option<JobView> {
        let state = self.state.read().await;
        state.jobs.get(id).map(Job::view)
    }

    /// Apply a mutation to a single job while holding the write lock.
    pub async fn update<T>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut Job) -> Result<T, JobQueueError>,
    ) -> Result<T, JobQueueError> {
        let mut state = self.state.write().await;
        let job = state
            .jobs
            .get_mut(id)
            .ok_or(JobQueueError::NotFound(*id))?;
        f(job)
    }

    /// Status of every stored job, taken under one read lock.
    pub async fn snapshot_statuses(&self) -> Vec<JobStatus> {
        let state = self.state.read().await;
        state.jobs.values().map(Job::status).collect()
    }

    /// Projections in most-recent-first order.
    pub async fn list_recent(&self, limit: usize, offset: usize) -> Vec<JobView> {
        let state = self.state.read().await;
        state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.jobs.get(id))
            .skip(offset)
            .take(limit)
            .map(Job::view)
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.jobs.len()
    }
}
