//! Ollama client errors.

use thiserror::Error;

/// Errors from the async Ollama management calls.
#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("ollama returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response from ollama: {0}")]
    Parse(String),
}
