//! VlogSnap - social video client
//!
//! Headless front end: wires the session and content stores to their
//! storage and backend, then drives them from a line console.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vlogsnap_core::AppConfig;

mod console;
mod state;
mod viewmodel;

#[tokio::main]
async fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!("Starting VlogSnap");
    if let Some(e) = config_error {
        tracing::warn!("Using default configuration: {}", e);
    }

    let app_state = match state::AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    // Load the initial feed in the background
    let content = app_state.content.clone();
    tokio::spawn(async move { content.load_videos().await });

    if let Err(e) = console::run(app_state).await {
        tracing::error!("Console error: {}", e);
        std::process::exit(1);
    }
}
