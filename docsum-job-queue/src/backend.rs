//! Backend trait for the text-generation service.

use crate::error::BackendError;

/// A synchronous text-generation call made once per job.
///
/// Implementations may block for minutes; the worker runs them on tokio's
/// blocking pool so they never stall submitters or pollers.
pub trait SummaryBackend: Send + Sync {
    fn generate(&self, text: &str, model: &str, mode: &str) -> Result<String, BackendError>;
}

impl<F> SummaryBackend for F
where
    F: Fn(&str, &str, &str) -> Result<String, BackendError> + Send + Sync,
{
    fn generate(&self, text: &str, model: &str, mode: &str) -> Result<String, BackendError> {
        self(text, model, mode)
    }
}

/// A backend that returns the input text unchanged.
///
/// Useful for wiring tests and local runs without an inference server.
#[derive(Debug, Default, Clone)]
pub struct EchoBackend;

impl SummaryBackend for EchoBackend {
    fn generate(&self, text: &str, _model: &str, _mode: &str) -> Result<String, BackendError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(BackendError::EmptyResult);
        }
        Ok(trimmed.to_owned())
    }
}
