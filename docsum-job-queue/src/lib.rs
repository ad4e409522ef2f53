//! Single-worker job queue for long-running summarization calls.
//!
//! Submissions return immediately with a job id. One worker task drains a FIFO
//! queue and calls the backend for one job at a time, so a local model stays
//! loaded between calls and never sees concurrent requests. Callers poll job
//! state and queue statistics at any time.
//!
//! # Architecture
//!
//! - [`JobQueueClient`] - Submit, poll and stats facade
//! - [`QueueWorker`] - The single consumer of the pending queue
//! - [`SummaryBackend`] - Trait for the blocking text-generation call
//! - [`JobStore`] - Concurrent map of every job ever submitted
//! - [`Job`] / [`JobStatus`] - Request payload and lifecycle state machine
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docsum_job_queue::{BackendError, JobQueueClient, QueueSettings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = QueueSettings::new(["llama3.2"], ["comprehensive"]);
//!     let backend = |text: &str, _model: &str, _mode: &str| -> Result<String, BackendError> {
//!         Ok(format!("{} words", text.split_whitespace().count()))
//!     };
//!     let client = JobQueueClient::start(settings, Arc::new(backend));
//!
//!     let id = client
//!         .submit("A long report", "llama3.2", "comprehensive")
//!         .await
//!         .unwrap();
//!     println!("{:?}", client.get_status(id).await.unwrap().status);
//! }
//! ```

mod backend;
mod client;
mod error;
mod queue;
mod store;
mod types;
mod worker;

pub use backend::{EchoBackend, SummaryBackend};
pub use client::{JobQueueClient, QueueSettings};
pub use error::{BackendError, JobQueueError};
pub use queue::{pending_queue, PendingQueue, PendingReceiver};
pub use store::JobStore;
pub use types::{Job, JobInput, JobStatus, JobView, QueueStats};
pub use worker::QueueWorker;
