//! FIFO admission channel between submitters and the worker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::error::JobQueueError;

/// Create a connected pending queue pair.
pub fn pending_queue() -> (PendingQueue, PendingReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let depth = Arc::new(AtomicUsize::new(0));
    (
        PendingQueue {
            tx,
            depth: Arc::clone(&depth),
        },
        PendingReceiver { rx, depth },
    )
}

/// Sending half, held by the facade.
///
/// Unbounded, so `enqueue` never waits on the worker.
#[derive(Debug, Clone)]
pub struct PendingQueue {
    tx: mpsc::UnboundedSender<Uuid>,
    depth: Arc<AtomicUsize>,
}

impl PendingQueue {
    pub fn enqueue(&self, id: Uuid) -> Result<(), JobQueueError> {
        // Count before sending so the receiver can never decrement below zero.
        self.depth.fetch_add(1, Ordering::SeqCst);
        self.tx.send(id).map_err(|_| {
            self.depth.fetch_sub(1, Ordering::SeqCst);
            JobQueueError::WorkerStopped
        })
    }

    /// Jobs enqueued but not yet taken by the worker.
    #[inline]
    pub fn len(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receiving half, owned by the single worker.
#[derive(Debug)]
pub struct PendingReceiver {
    rx: mpsc::UnboundedReceiver<Uuid>,
    depth: Arc<AtomicUsize>,
}

impl PendingReceiver {
    /// Wait for the next job id. Returns `None` once every sender is dropped.
    pub async fn dequeue(&mut self) -> Option<Uuid> {
        let id = self.rx.recv().await?;
        self.depth.fetch_sub(1, Ordering::SeqCst);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dequeues_in_fifo_order() {
        let (queue, mut rx) = pending_queue();
        let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            queue.enqueue(*id).unwrap();
        }
        assert_eq!(queue.len(), 4);

        for id in &ids {
            assert_eq!(rx.dequeue().await, Some(*id));
        }
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn closes_when_senders_drop() {
        let (queue, mut rx) = pending_queue();
        queue.enqueue(Uuid::new_v4()).unwrap();
        drop(queue);

        assert!(rx.dequeue().await.is_some());
        assert!(rx.dequeue().await.is_none());
    }

    #[tokio::test]
    async fn enqueue_fails_without_worker() {
        let (queue, rx) = pending_queue();
        drop(rx);

        let err = queue.enqueue(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, JobQueueError::WorkerStopped));
        assert_eq!(queue.len(), 0);
    }
}
