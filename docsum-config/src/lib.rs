//! Configuration for the docsum backend.
//!
//! Values are resolved in three layers: built-in defaults, then an optional
//! config file, then `DOCSUM_*` environment variables.

mod env;
mod raw;
mod validate;

use std::path::Path;

use serde::Serialize;

pub use env::{apply_env_overrides, apply_overrides_from};
pub use raw::{
    load_raw_from_file, LoggingSection, ModelsSection, OllamaSection, RawConfigFile,
    ServerSection, SummarySection,
};
pub use validate::validate_config;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub ollama: OllamaConfig,
    pub models: ModelsConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OllamaConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub temperature: f32,
    pub num_predict: u32,
    pub num_ctx: u32,
}

/// Models users may pick from, and the one used when a request names none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelsConfig {
    pub available: Vec<String>,
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryConfig {
    pub default_mode: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json: false,
            },
            ollama: OllamaConfig {
                base_url: "http://localhost:11434".to_string(),
                request_timeout_secs: 300,
                temperature: 0.3,
                num_predict: 500,
                num_ctx: 4096,
            },
            models: ModelsConfig {
                available: vec!["llama3.2".to_string(), "phi3".to_string()],
                default: "llama3.2".to_string(),
            },
            summary: SummaryConfig {
                default_mode: "comprehensive".to_string(),
            },
        }
    }
}

macro_rules! apply_opt {
    ($target:expr, $source:expr) => {
        if let Some(v) = $source {
            $target = v;
        }
    };
}

impl Config {
    /// Overlay the values present in a parsed config file.
    pub fn merge_file(&mut self, raw: RawConfigFile) {
        if let Some(server) = raw.server {
            apply_opt!(self.server.host, server.host);
            apply_opt!(self.server.port, server.port);
        }
        if let Some(logging) = raw.logging {
            apply_opt!(self.logging.level, logging.level);
            apply_opt!(self.logging.json, logging.json);
        }
        if let Some(ollama) = raw.ollama {
            apply_opt!(self.ollama.base_url, ollama.base_url);
            apply_opt!(self.ollama.request_timeout_secs, ollama.request_timeout_secs);
            apply_opt!(self.ollama.temperature, ollama.temperature);
            apply_opt!(self.ollama.num_predict, ollama.num_predict);
            apply_opt!(self.ollama.num_ctx, ollama.num_ctx);
        }
        if let Some(models) = raw.models {
            apply_opt!(self.models.available, models.available);
            apply_opt!(self.models.default, models.default);
        }
        if let Some(summary) = raw.summary {
            apply_opt!(self.summary.default_mode, summary.default_mode);
        }
    }
}

/// Load configuration from an optional file plus the process environment.
/// Environment variables win over file values, which win over defaults.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ConfigError> {
    let mut cfg = Config::default();
    if let Some(p) = path {
        cfg.merge_file(load_raw_from_file(p)?);
    }
    apply_env_overrides(&mut cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("tmpfile");
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.models.available, vec!["llama3.2", "phi3"]);
        assert_eq!(cfg.models.default, "llama3.2");
        assert_eq!(cfg.summary.default_mode, "comprehensive");
        validate_config(&cfg).expect("defaults validate");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let f = config_file(
            ".toml",
            r#"
[server]
port = 9100

[ollama]
base_url = "http://gpu-box:11434"
request_timeout_secs = 120

[models]
available = ["phi3", "mistral"]
default = "phi3"
"#,
        );
        let mut cfg = Config::default();
        cfg.merge_file(load_raw_from_file(f.path()).expect("load"));

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.ollama.base_url, "http://gpu-box:11434");
        assert_eq!(cfg.ollama.request_timeout_secs, 120);
        assert_eq!(cfg.ollama.num_ctx, 4096);
        assert_eq!(cfg.models.available, vec!["phi3", "mistral"]);
        assert_eq!(cfg.models.default, "phi3");
    }

    #[test]
    fn yaml_file_is_parsed() {
        let f = config_file(
            ".yaml",
            r#"
logging:
  level: debug
  json: true
summary:
  default_mode: executive
"#,
        );
        let raw = load_raw_from_file(f.path()).expect("load");
        let logging = raw.logging.expect("logging section");
        assert_eq!(logging.level.as_deref(), Some("debug"));
        assert_eq!(logging.json, Some(true));
        assert_eq!(
            raw.summary.and_then(|s| s.default_mode).as_deref(),
            Some("executive")
        );
    }

    #[test]
    fn unknown_extension_is_detected() {
        let f = config_file(".conf", r#"{"server": {"host": "127.0.0.1"}}"#);
        let raw = load_raw_from_file(f.path()).expect("load");
        assert_eq!(raw.server.and_then(|s| s.host).as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let f = config_file(".toml", "[server\nport = ");
        assert!(matches!(
            load_raw_from_file(f.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Some("/nonexistent/docsum.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
