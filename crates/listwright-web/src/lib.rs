//! Listwright Web
//!
//! Browser front end for the optimizer: a manual tab for pasted listing text,
//! a batch tab for ASINs and product URLs, and plain-text export of both.

#![warn(missing_docs)]

pub mod handlers;
pub mod pages;

use handlers::{create_router, AppState};
use listwright_domain::traits::{ListingSource, LlmProvider};
use listwright_optimizer::{AppConfig, ConfigError, Credentials};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Web server error
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the shared state: clients are created once and shared by every request
pub fn build_state(config: &AppConfig, credentials: &Credentials) -> AppState {
    let provider: Arc<dyn LlmProvider> = Arc::new(config.build_provider(credentials));
    let source: Arc<dyn ListingSource> = Arc::new(config.build_source(credentials));

    AppState {
        optimizer: Arc::new(config.build_optimizer(provider)),
        source,
        export_dir: config.export_dir(),
    }
}

/// Start the web server
///
/// Builds the provider and listing source from configuration and serves
/// until the process is stopped.
pub async fn start_server(config: AppConfig, credentials: Credentials) -> Result<(), WebError> {
    info!("Starting Listwright web server");
    info!("Bind address: {}", config.bind_addr());
    info!("Listing source: {}", config.source);
    info!("Marketplace: {}", config.marketplace);
    info!(
        "Model: {} (persona '{}')",
        config.generation.model, config.generation.persona
    );
    info!("Export directory: {}", config.export_dir().display());

    let app = create_router(build_state(&config, &credentials));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| WebError::Server(e.to_string()))?;

    Ok(())
}
