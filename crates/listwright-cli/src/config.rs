//! Configuration loading for the CLI.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use listwright_optimizer::AppConfig;
use std::path::{Path, PathBuf};

/// Default configuration file: `~/.listwright/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".listwright").join("config.toml"))
}

/// Load configuration from `path`, else the default file when it exists,
/// else built-in defaults.
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::InvalidInput(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Ok(AppConfig::from_file(path)?)
        }
        None => match default_path().filter(|p| p.exists()) {
            Some(path) => Ok(AppConfig::from_file(path)?),
            None => Ok(AppConfig::default()),
        },
    }
}

/// Apply the global command-line overrides to `config`.
pub fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(persona) = cli.persona {
        config.generation.persona = persona;
    }
    if let Some(marketplace) = cli.marketplace {
        config.marketplace = marketplace;
    }
}
