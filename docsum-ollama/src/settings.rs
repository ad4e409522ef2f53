//! Connection and sampling settings shared by the Ollama clients.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
pub const TAGS_TIMEOUT: Duration = Duration::from_secs(3);

/// Where Ollama lives and how each generation call is sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaSettings {
    pub base_url: String,
    pub request_timeout: Duration,
    pub temperature: f32,
    /// Maximum output tokens.
    pub num_predict: u32,
    /// Context window size.
    pub num_ctx: u32,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            temperature: 0.3,
            num_predict: 500,
            num_ctx: 4096,
        }
    }
}

impl OllamaSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Absolute URL for an API path such as `/api/generate`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let settings = OllamaSettings::with_base_url("http://ollama:11434/");
        assert_eq!(settings.endpoint("/api/tags"), "http://ollama:11434/api/tags");
        assert_eq!(
            OllamaSettings::default().endpoint("/api/generate"),
            "http://localhost:11434/api/generate"
        );
    }
}
