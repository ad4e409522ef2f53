use std::time::Duration;

use docsum_config::{Config, ConfigError, OllamaConfig};
use docsum_job_queue::QueueSettings;
use docsum_ollama::{prompts, OllamaSettings};

use crate::state::RequestDefaults;

/// Build Ollama connection settings from application config.
pub fn ollama_settings_from_config(cfg: &OllamaConfig) -> OllamaSettings {
    OllamaSettings {
        base_url: cfg.base_url.clone(),
        request_timeout: Duration::from_secs(cfg.request_timeout_secs),
        temperature: cfg.temperature,
        num_predict: cfg.num_predict,
        num_ctx: cfg.num_ctx,
    }
}

/// The queue accepts the configured models and every built-in summary mode.
pub fn queue_settings_from_config(cfg: &Config) -> QueueSettings {
    QueueSettings::new(cfg.models.available.iter().cloned(), prompts::MODES)
}

/// Request defaults, rejecting a default summary type with no template.
pub fn request_defaults_from_config(cfg: &Config) -> Result<RequestDefaults, ConfigError> {
    if !prompts::is_known_mode(&cfg.summary.default_mode) {
        return Err(ConfigError::Validation(format!(
            "summary.default_mode '{}' must be one of: {}",
            cfg.summary.default_mode,
            prompts::MODES.join(", ")
        )));
    }
    Ok(RequestDefaults {
        model: cfg.models.default.clone(),
        mode: cfg.summary.default_mode.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_config() {
        let cfg = Config::default();
        let defaults = request_defaults_from_config(&cfg).unwrap();
        assert_eq!(defaults.model, "llama3.2");
        assert_eq!(defaults.mode, "comprehensive");

        let queue = queue_settings_from_config(&cfg);
        assert_eq!(queue.models, vec!["llama3.2", "phi3"]);
        assert_eq!(queue.modes, vec!["comprehensive", "executive", "bullet_points"]);
    }

    #[test]
    fn unknown_default_mode_is_rejected() {
        let mut cfg = Config::default();
        cfg.summary.default_mode = "haiku".into();
        assert!(matches!(
            request_defaults_from_config(&cfg),
            Err(ConfigError::Validation(msg)) if msg.contains("haiku")
        ));
    }

    #[test]
    fn ollama_timeout_is_seconds() {
        let mut cfg = Config::default();
        cfg.ollama.request_timeout_secs = 42;
        let settings = ollama_settings_from_config(&cfg.ollama);
        assert_eq!(settings.request_timeout, Duration::from_secs(42));
        assert_eq!(settings.base_url, "http://localhost:11434");
    }

    #[test]
    fn default_config_matches_ollama_defaults() {
        let settings = ollama_settings_from_config(&Config::default().ollama);
        assert_eq!(settings, OllamaSettings::default());
        assert_eq!(settings.base_url, docsum_ollama::DEFAULT_BASE_URL);
        assert_eq!(settings.request_timeout, docsum_ollama::DEFAULT_REQUEST_TIMEOUT);
    }
}
