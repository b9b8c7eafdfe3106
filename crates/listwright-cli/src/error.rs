//! Error types for the CLI application.

use listwright_domain::{FetchError, ResolveError};
use listwright_optimizer::{ConfigError, ExportError, OptimizerError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error, including missing credentials
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input is not an ASIN or product URL
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    /// Listing source error
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Audit or rewrite failed
    #[error("{0}")]
    Optimizer(#[from] OptimizerError),

    /// Export error
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
