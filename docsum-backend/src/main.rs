//! docsum backend server
//!
//! Loads configuration, starts the summarization queue worker and serves the
//! HTTP API until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use docsum_job_queue::JobQueueClient;
use docsum_ollama::{OllamaBackend, OllamaClient};
use tokio::net::TcpListener;
use tracing::info;

use docsum_backend::config_helpers::{
    ollama_settings_from_config, queue_settings_from_config, request_defaults_from_config,
};
use docsum_backend::state::AppState;

mod cli;
mod tracing_setup;

use cli::CliArgs;
use tracing_setup::install_tracing_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    eprintln!("[STARTUP] Loading config from: {:?}", args.config_path);
    let config = docsum_config::load_config(args.config_path.as_deref())
        .context("failed to load configuration")?;
    docsum_config::validate_config(&config).context("invalid configuration")?;
    let defaults = request_defaults_from_config(&config).context("invalid configuration")?;

    install_tracing_from_config(&config.logging);

    let ollama_settings = ollama_settings_from_config(&config.ollama);
    info!(
        ollama_url = %ollama_settings.base_url,
        timeout_secs = ollama_settings.request_timeout.as_secs(),
        models = ?config.models.available,
        default_model = %defaults.model,
        default_mode = %defaults.mode,
        "summarizer configuration"
    );

    let backend = OllamaBackend::new(ollama_settings.clone());
    let job_queue = JobQueueClient::start(queue_settings_from_config(&config), Arc::new(backend));
    let ollama = OllamaClient::new(ollama_settings).context("failed to build ollama client")?;

    let state = Arc::new(AppState::new(job_queue, ollama, defaults));
    let app = docsum_backend::build_router(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
