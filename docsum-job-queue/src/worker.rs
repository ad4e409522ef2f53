//! The single worker that drains the pending queue.

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::backend::SummaryBackend;
use crate::error::BackendError;
use crate::queue::PendingReceiver;
use crate::store::JobStore;

/// Owns the receiving side of the queue and processes one job at a time.
///
/// Only one worker exists per [`JobQueueClient`](crate::JobQueueClient), so a
/// stateful backend sees strictly sequential calls.
#[derive(Debug)]
pub struct QueueWorker {
    store: JobStore,
    pending: PendingReceiver,
}

impl QueueWorker {
    pub(crate) fn new(store: JobStore, pending: PendingReceiver) -> Self {
        Self { store, pending }
    }

    /// Run the loop on a new tokio task.
    pub fn spawn(self, backend: Arc<dyn SummaryBackend>) -> JoinHandle<()> {
        tokio::spawn(self.run(backend))
    }

    /// Process jobs until every submitter handle has been dropped.
    pub async fn run(mut self, backend: Arc<dyn SummaryBackend>) {
        info!("queue worker started");
        while let Some(id) = self.pending.dequeue().await {
            self.process(id, &backend).await;
        }
        info!("queue worker stopped: all submitters dropped");
    }

    async fn process(&self, id: Uuid, backend: &Arc<dyn SummaryBackend>) {
        let input = match self
            .store
            .update(&id, |job| {
                job.start()?;
                Ok(Arc::clone(job.input()))
            })
            .await
        {
            Ok(input) => input,
            Err(e) => {
                warn!(job_id = %id, error = %e, "skipping job that cannot be started");
                return;
            }
        };

        info!(
            job_id = %id,
            model = %input.model,
            mode = %input.mode,
            "processing job"
        );
        let started = Instant::now();

        let call_backend = Arc::clone(backend);
        let call_input = Arc::clone(&input);
        let outcome = tokio::task::spawn_blocking(move || {
            call_backend.generate(&call_input.text, &call_input.model, &call_input.mode)
        })
        .await
        .unwrap_or_else(|e| Err(BackendError::Panicked(join_error_message(e))));

        let elapsed = started.elapsed();
        match &outcome {
            Ok(_) => info!(
                job_id = %id,
                elapsed_secs = elapsed.as_secs_f64(),
                "job completed"
            ),
            Err(e) => error!(
                job_id = %id,
                elapsed_secs = elapsed.as_secs_f64(),
                error = %e,
                "job failed"
            ),
        }

        if let Err(e) = self
            .store
            .update(&id, |job| job.finish(outcome, elapsed))
            .await
        {
            error!(job_id = %id, error = %e, "failed to record job outcome");
        }
    }
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return "backend task was cancelled".to_owned();
    }
    panic_message(err.into_panic())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(msg) => *msg,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .unwrap_or_else(|| "unknown panic".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_become_messages() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new(String::from("bang"))), "bang");
        assert_eq!(panic_message(Box::new(42u8)), "unknown panic");
    }
}
