//! Error types for the optimizer

use listwright_domain::GenerationError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during an audit or rewrite call
#[derive(Error, Debug)]
pub enum OptimizerError {
    /// LLM provider error, passed through unchanged
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The provider did not answer within the configured time
    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors that can occur while exporting results to a file
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing has been generated yet
    #[error("No results to export. Run {0} first.")]
    NothingToExport(&'static str),

    /// Writing the export file failed
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Required credential missing from the environment
    #[error("{0} is missing or empty. Set it in the environment or in a .env file.")]
    MissingCredential(&'static str),
}
