use std::path::PathBuf;

use clap::Parser;

/// Queued document summarization API backed by a local Ollama server.
#[derive(Debug, Parser)]
#[command(name = "docsum-backend", version, about)]
pub struct CliArgs {
    /// Path to a TOML, YAML or JSON configuration file
    #[arg(short = 'c', long = "config-path", env = "DOCSUM_CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_flags() {
        let args = CliArgs::try_parse_from(["docsum-backend", "-c", "docsum.toml"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("docsum.toml")));

        let args =
            CliArgs::try_parse_from(["docsum-backend", "--config-path=/etc/docsum.yaml"]).unwrap();
        assert_eq!(args.config_path, Some(PathBuf::from("/etc/docsum.yaml")));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(CliArgs::try_parse_from(["docsum-backend", "--port", "1"]).is_err());
    }
}
