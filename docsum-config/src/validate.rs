use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Config, ConfigError};

static HOSTNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][-a-zA-Z0-9\.]*[a-zA-Z0-9]$").expect("hostname pattern compiles")
});

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// Check constraints that span fields of the resolved configuration.
pub fn validate_config(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.server.port == 0 {
        return Err(invalid("server.port must be > 0"));
    }
    let host = cfg.server.host.as_str();
    if host.parse::<std::net::IpAddr>().is_err() && !HOSTNAME_REGEX.is_match(host) {
        return Err(invalid(format!("invalid server.host: {host}")));
    }

    match url::Url::parse(&cfg.ollama.base_url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {}
        Ok(_) => {
            return Err(invalid(format!(
                "ollama.base_url must be http or https: {}",
                cfg.ollama.base_url
            )))
        }
        Err(e) => {
            return Err(invalid(format!(
                "invalid ollama.base_url {}: {e}",
                cfg.ollama.base_url
            )))
        }
    }
    if cfg.ollama.request_timeout_secs == 0 {
        return Err(invalid("ollama.request_timeout_secs must be > 0"));
    }
    if !cfg.ollama.temperature.is_finite() || cfg.ollama.temperature < 0.0 {
        return Err(invalid("ollama.temperature must be a non-negative number"));
    }

    if cfg.models.available.is_empty() {
        return Err(invalid("models.available must list at least one model"));
    }
    if let Some(blank) = cfg.models.available.iter().position(|m| m.trim().is_empty()) {
        return Err(invalid(format!("models.available[{blank}] is empty")));
    }
    if !cfg.models.available.contains(&cfg.models.default) {
        return Err(invalid(format!(
            "models.default '{}' is not in models.available",
            cfg.models.default
        )));
    }

    if cfg.summary.default_mode.trim().is_empty() {
        return Err(invalid("summary.default_mode must not be empty"));
    }
    Ok(())
}
