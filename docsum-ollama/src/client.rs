//! Async management calls against the Ollama API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::OllamaError;
use crate::settings::{OllamaSettings, TAGS_TIMEOUT};

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TaggedModel>,
}

#[derive(Debug, Deserialize)]
struct TaggedModel {
    name: String,
}

/// Whether a configured model has been pulled into Ollama.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReadiness {
    pub name: String,
    pub ready: bool,
}

/// Queries the local Ollama server for installed models.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    settings: OllamaSettings,
}

impl OllamaClient {
    pub fn new(settings: OllamaSettings) -> Result<Self, OllamaError> {
        let client = Client::builder()
            .user_agent(concat!("docsum/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OllamaError::Client(e.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Names of every model pulled into Ollama, tags included (`phi3:latest`).
    pub async fn pulled_models(&self) -> Result<Vec<String>, OllamaError> {
        let url = self.settings.endpoint("/api/tags");
        debug!(%url, "listing pulled models");

        let response = self
            .client
            .get(&url)
            .timeout(TAGS_TIMEOUT)
            .send()
            .await
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Readiness of each registry model. If Ollama cannot be queried every
    /// model is reported as not ready.
    pub async fn model_readiness(&self, registry: &[String]) -> Vec<ModelReadiness> {
        match self.pulled_models().await {
            Ok(pulled) => readiness_from(registry, &pulled),
            Err(e) => {
                warn!(error = %e, "could not list ollama models");
                registry
                    .iter()
                    .map(|name| ModelReadiness {
                        name: name.clone(),
                        ready: false,
                    })
                    .collect()
            }
        }
    }
}

/// A registry model is ready when some pulled name starts with it.
pub fn readiness_from(registry: &[String], pulled: &[String]) -> Vec<ModelReadiness> {
    registry
        .iter()
        .map(|name| ModelReadiness {
            name: name.clone(),
            ready: pulled.iter().any(|p| p.starts_with(name.as_str())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prefix_match_counts_tagged_models() {
        let registry = names(&["llama3.2", "phi3"]);
        let pulled = names(&["llama3.2:latest", "mistral:7b"]);

        let ready = readiness_from(&registry, &pulled);
        assert_eq!(
            ready,
            vec![
                ModelReadiness { name: "llama3.2".into(), ready: true },
                ModelReadiness { name: "phi3".into(), ready: false },
            ]
        );
    }

    #[test]
    fn nothing_pulled_means_nothing_ready() {
        let ready = readiness_from(&names(&["phi3"]), &[]);
        assert!(!ready[0].ready);
    }
}
