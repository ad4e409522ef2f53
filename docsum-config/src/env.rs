//! `DOCSUM_*` environment overrides.

use std::str::FromStr;

use crate::{Config, ConfigError};

pub const SERVER_HOST: &str = "DOCSUM_SERVER_HOST";
pub const SERVER_PORT: &str = "DOCSUM_SERVER_PORT";
pub const LOG_LEVEL: &str = "DOCSUM_LOG_LEVEL";
pub const LOG_JSON: &str = "DOCSUM_LOG_JSON";
pub const OLLAMA_URL: &str = "DOCSUM_OLLAMA_URL";
pub const OLLAMA_TIMEOUT_SECS: &str = "DOCSUM_OLLAMA_TIMEOUT_SECS";
pub const OLLAMA_TEMPERATURE: &str = "DOCSUM_OLLAMA_TEMPERATURE";
pub const OLLAMA_NUM_PREDICT: &str = "DOCSUM_OLLAMA_NUM_PREDICT";
pub const OLLAMA_NUM_CTX: &str = "DOCSUM_OLLAMA_NUM_CTX";
pub const MODELS: &str = "DOCSUM_MODELS";
pub const DEFAULT_MODEL: &str = "DOCSUM_DEFAULT_MODEL";
pub const DEFAULT_SUMMARY_TYPE: &str = "DOCSUM_DEFAULT_SUMMARY_TYPE";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(cfg: &mut Config) -> Result<(), ConfigError> {
    apply_overrides_from(cfg, |key| std::env::var(key).ok())
}

/// Apply overrides from any key lookup.
pub fn apply_overrides_from<F>(cfg: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let vars = Vars(lookup);

    if let Some(v) = vars.string(SERVER_HOST) {
        cfg.server.host = v;
    }
    if let Some(v) = vars.parse(SERVER_PORT)? {
        cfg.server.port = v;
    }

    if let Some(v) = vars.string(LOG_LEVEL) {
        cfg.logging.level = v;
    }
    if let Some(v) = vars.boolean(LOG_JSON)? {
        cfg.logging.json = v;
    }

    if let Some(v) = vars.string(OLLAMA_URL) {
        cfg.ollama.base_url = v;
    }
    if let Some(v) = vars.parse(OLLAMA_TIMEOUT_SECS)? {
        cfg.ollama.request_timeout_secs = v;
    }
    if let Some(v) = vars.parse(OLLAMA_TEMPERATURE)? {
        cfg.ollama.temperature = v;
    }
    if let Some(v) = vars.parse(OLLAMA_NUM_PREDICT)? {
        cfg.ollama.num_predict = v;
    }
    if let Some(v) = vars.parse(OLLAMA_NUM_CTX)? {
        cfg.ollama.num_ctx = v;
    }

    if let Some(v) = vars.string(MODELS) {
        cfg.models.available = split_csv(&v);
    }
    if let Some(v) = vars.string(DEFAULT_MODEL) {
        cfg.models.default = v;
    }
    if let Some(v) = vars.string(DEFAULT_SUMMARY_TYPE) {
        cfg.summary.default_mode = v;
    }

    Ok(())
}

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    #[inline]
    fn string(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn parse<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.string(key)
            .map(|v| {
                v.trim()
                    .parse::<T>()
                    .map_err(|e| ConfigError::Parse(format!("invalid {key}: {e}")))
            })
            .transpose()
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        self.string(key)
            .map(|v| parse_bool(&v).ok_or_else(|| ConfigError::Parse(format!("invalid {key}"))))
            .transpose()
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut cfg = Config::default();
        apply_overrides_from(&mut cfg, |k| vars.get(k).cloned())?;
        Ok(cfg)
    }

    #[test]
    fn overrides_every_section() {
        let cfg = apply(&[
            (SERVER_HOST, "10.1.2.3"),
            (SERVER_PORT, "1234"),
            (LOG_LEVEL, "debug"),
            (LOG_JSON, "TRUE"),
            (OLLAMA_URL, "http://ollama:11434"),
            (OLLAMA_TIMEOUT_SECS, "60"),
            (OLLAMA_TEMPERATURE, "0.7"),
            (OLLAMA_NUM_PREDICT, "800"),
            (OLLAMA_NUM_CTX, "8192"),
            (MODELS, "phi3, mistral, ,gemma2"),
            (DEFAULT_MODEL, "mistral"),
            (DEFAULT_SUMMARY_TYPE, "bullet_points"),
        ])
        .unwrap();

        assert_eq!(cfg.server.host, "10.1.2.3");
        assert_eq!(cfg.server.port, 1234);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.json);
        assert_eq!(cfg.ollama.base_url, "http://ollama:11434");
        assert_eq!(cfg.ollama.request_timeout_secs, 60);
        assert!((cfg.ollama.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(cfg.ollama.num_predict, 800);
        assert_eq!(cfg.ollama.num_ctx, 8192);
        assert_eq!(cfg.models.available, vec!["phi3", "mistral", "gemma2"]);
        assert_eq!(cfg.models.default, "mistral");
        assert_eq!(cfg.summary.default_mode, "bullet_points");
    }

    #[test]
    fn absent_vars_keep_current_values() {
        assert_eq!(apply(&[]).unwrap(), Config::default());
    }

    #[test]
    fn bad_numbers_and_bools_are_rejected() {
        let err = apply(&[(SERVER_PORT, "eighty")]).unwrap_err();
        assert!(err.to_string().contains(SERVER_PORT));

        let err = apply(&[(LOG_JSON, "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
