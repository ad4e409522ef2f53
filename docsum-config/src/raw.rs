//! On-disk configuration shape. Every field is optional so a file only needs
//! the values it changes.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

#[derive(Debug, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: Option<ServerSection>,
    #[serde(default)]
    pub logging: Option<LoggingSection>,
    #[serde(default)]
    pub ollama: Option<OllamaSection>,
    #[serde(default)]
    pub models: Option<ModelsSection>,
    #[serde(default)]
    pub summary: Option<SummarySection>,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub json: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct OllamaSection {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub num_predict: Option<u32>,
    #[serde(default)]
    pub num_ctx: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ModelsSection {
    #[serde(default)]
    pub available: Option<Vec<String>>,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarySection {
    #[serde(default)]
    pub default_mode: Option<String>,
}

/// Read a config file. `.toml`, `.yaml`/`.yml` and `.json` pick the parser;
/// anything else is tried against every enabled format.
pub fn load_raw_from_file<P: AsRef<Path>>(path: P) -> Result<RawConfigFile, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    parse_raw(&contents, ext.as_deref())
}

pub(crate) fn parse_raw(contents: &str, ext: Option<&str>) -> Result<RawConfigFile, ConfigError> {
    match ext {
        #[cfg(feature = "toml")]
        Some("toml") => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        #[cfg(feature = "yaml")]
        Some("yaml" | "yml") => {
            serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        }
        #[cfg(feature = "json")]
        Some("json") => {
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        }
        _ => detect_format(contents),
    }
}

fn detect_format(contents: &str) -> Result<RawConfigFile, ConfigError> {
    #[cfg(feature = "toml")]
    if let Ok(raw) = toml::from_str(contents) {
        return Ok(raw);
    }

    #[cfg(feature = "json")]
    if let Ok(raw) = serde_json::from_str(contents) {
        return Ok(raw);
    }

    #[cfg(feature = "yaml")]
    if let Ok(raw) = serde_yaml::from_str(contents) {
        return Ok(raw);
    }

    #[cfg(any(feature = "yaml", feature = "toml", feature = "json"))]
    {
        Err(ConfigError::Parse(
            "config is not valid in any supported format".into(),
        ))
    }

    #[cfg(not(any(feature = "yaml", feature = "toml", feature = "json")))]
    {
        let _ = contents;
        Err(ConfigError::Parse("no config format enabled".into()))
    }
}
