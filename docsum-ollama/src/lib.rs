//! Ollama integration for the docsum backend.
//!
//! - [`OllamaBackend`] implements [`SummaryBackend`](docsum_job_queue::SummaryBackend)
//!   with a blocking call to `/api/generate`.
//! - [`OllamaClient`] lists pulled models so callers can tell which configured
//!   models are ready.
//! - [`prompts`] holds the per-mode prompt templates.
//! - [`evaluation`] scores finished summaries for readability and focus.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docsum_job_queue::{JobQueueClient, QueueSettings};
//! use docsum_ollama::{prompts, OllamaBackend, OllamaSettings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OllamaBackend::new(OllamaSettings::default());
//!     let settings = QueueSettings::new(["llama3.2", "phi3"], prompts::MODES);
//!     let queue = JobQueueClient::start(settings, Arc::new(backend));
//!     let id = queue.submit("A long report", "phi3", "executive").await.unwrap();
//!     println!("queued {id}");
//! }
//! ```

mod backend;
mod client;
mod error;
pub mod evaluation;
pub mod prompts;
mod settings;

pub use backend::{OllamaBackend, CONNECTION_MESSAGE, TIMEOUT_MESSAGE};
pub use client::{readiness_from, ModelReadiness, OllamaClient};
pub use error::OllamaError;
pub use settings::{OllamaSettings, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
