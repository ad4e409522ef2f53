use docsum_job_queue::JobQueueClient;
use docsum_ollama::OllamaClient;

/// Model and summary type used when a request leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub model: String,
    pub mode: String,
}

/// Shared application state passed to every route handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub job_queue: JobQueueClient,
    pub ollama: OllamaClient,
    pub defaults: RequestDefaults,
}

impl AppState {
    pub fn new(job_queue: JobQueueClient, ollama: OllamaClient, defaults: RequestDefaults) -> Self {
        Self {
            job_queue,
            ollama,
            defaults,
        }
    }

    /// Models a request may name.
    #[inline]
    pub fn models(&self) -> &[String] {
        &self.job_queue.settings().models
    }
}
