use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn install_tracing_from_config(cfg: &docsum_config::LoggingConfig) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| cfg.level.clone());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_timer(ChronoUtc::rfc_3339());

    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
