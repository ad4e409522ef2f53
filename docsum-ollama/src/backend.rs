//! Blocking `/api/generate` backend used by the queue worker.

use std::time::Instant;

use docsum_job_queue::{BackendError, SummaryBackend};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::evaluation::evaluate_summary;
use crate::prompts::build_prompt;
use crate::settings::OllamaSettings;

pub const CONNECTION_MESSAGE: &str =
    "Cannot connect to Ollama. Make sure it is running: ollama serve";
pub const TIMEOUT_MESSAGE: &str = "Ollama timed out. Try a smaller model like phi3.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    /// `-1` keeps the model resident between jobs.
    keep_alive: i32,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
    num_ctx: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Summarizes documents with a local Ollama server.
///
/// The HTTP client is created on first use. The worker only ever calls
/// [`generate`](SummaryBackend::generate) from a blocking thread, which is
/// where reqwest's blocking client has to live.
#[derive(Debug)]
pub struct OllamaBackend {
    settings: OllamaSettings,
    http: OnceCell<Client>,
}

impl OllamaBackend {
    pub fn new(settings: OllamaSettings) -> Self {
        Self {
            settings,
            http: OnceCell::new(),
        }
    }

    fn http(&self) -> Result<&Client, BackendError> {
        self.http.get_or_try_init(|| {
            Client::builder()
                .timeout(self.settings.request_timeout)
                .user_agent(concat!("docsum/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| BackendError::Http(format!("failed to build http client: {e}")))
        })
    }
}

impl SummaryBackend for OllamaBackend {
    fn generate(&self, text: &str, model: &str, mode: &str) -> Result<String, BackendError> {
        let prompt = build_prompt(text, mode);
        let request = GenerateRequest {
            model,
            prompt: &prompt,
            stream: false,
            keep_alive: -1,
            options: GenerateOptions {
                temperature: self.settings.temperature,
                num_predict: self.settings.num_predict,
                num_ctx: self.settings.num_ctx,
            },
        };
        let url = self.settings.endpoint("/api/generate");
        debug!(%url, model, mode, prompt_chars = prompt.len(), "calling ollama");
        let started = Instant::now();

        let response = self
            .http()?
            .post(&url)
            .json(&request)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, model, "ollama generate returned an error");
            return Err(BackendError::Http(format!("{status}: {}", body.trim())));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| BackendError::Http(format!("invalid response body: {e}")))?;
        let summary = body.response.trim();
        if summary.is_empty() {
            return Err(BackendError::EmptyResult);
        }

        let quality = evaluate_summary(summary, started.elapsed().as_secs_f64());
        debug!(
            model,
            mode,
            words = quality.word_count,
            readability = quality.readability,
            on_topic = quality.starts_on_topic,
            secs = quality.time_taken,
            "summary generated"
        );
        Ok(summary.to_owned())
    }
}

fn transport_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout(TIMEOUT_MESSAGE.to_owned())
    } else if err.is_connect() {
        BackendError::Connection(CONNECTION_MESSAGE.to_owned())
    } else {
        BackendError::Http(err.to_string())
    }
}
