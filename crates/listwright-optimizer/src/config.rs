//! Configuration for the optimizer and its front ends
//!
//! Settings come from a TOML file; every field has a default, so an empty
//! file (or no file) is a valid configuration. API keys never appear in the
//! file: they are read from the environment into [`Credentials`].

use crate::error::ConfigError;
use crate::optimizer::{Optimizer, DEFAULT_GENERATION_TIMEOUT_SECS};
use crate::persona::Persona;
use listwright_catalog::{keepa, scrape, CatalogSource, KeepaSource, ScrapeSource, SourceKind};
use listwright_domain::Marketplace;
use listwright_llm::{openai, OpenAiProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the chat-completions API key
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the Keepa API key
pub const KEEPA_API_KEY_VAR: &str = "KEEPA_API_KEY";

/// Environment variable overriding `bind_port`
pub const PORT_VAR: &str = "PORT";

/// Application configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bind address (e.g., "0.0.0.0")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 7860)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Where listings are fetched from
    #[serde(default)]
    pub source: SourceKind,

    /// Storefront region
    #[serde(default)]
    pub marketplace: Marketplace,

    /// Directory for export files (default: OS temp dir)
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Keepa settings
    #[serde(default)]
    pub keepa: KeepaConfig,

    /// Product page scrape settings
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

/// `[generation]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Rewrite persona
    #[serde(default)]
    pub persona: Persona,

    /// Per-call timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

/// `[keepa]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepaConfig {
    /// Keepa API base URL
    #[serde(default = "default_keepa_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_keepa_timeout")]
    pub timeout_secs: u64,
}

/// `[scrape]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Storefront base URL (default: derived from `marketplace`)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_scrape_timeout")]
    pub timeout_secs: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_port() -> u16 {
    7860
}

fn default_model() -> String {
    openai::DEFAULT_MODEL.to_string()
}

fn default_openai_base_url() -> String {
    openai::DEFAULT_BASE_URL.to_string()
}

fn default_generation_timeout() -> u64 {
    DEFAULT_GENERATION_TIMEOUT_SECS
}

fn default_keepa_base_url() -> String {
    keepa::DEFAULT_BASE_URL.to_string()
}

fn default_keepa_timeout() -> u64 {
    keepa::DEFAULT_TIMEOUT_SECS
}

fn default_scrape_timeout() -> u64 {
    scrape::DEFAULT_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            source: SourceKind::default(),
            marketplace: Marketplace::default(),
            export_dir: None,
            generation: GenerationConfig::default(),
            keepa: KeepaConfig::default(),
            scrape: ScrapeConfig::default(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_openai_base_url(),
            persona: Persona::default(),
            timeout_secs: default_generation_timeout(),
        }
    }
}

impl Default for KeepaConfig {
    fn default() -> Self {
        Self {
            base_url: default_keepa_base_url(),
            timeout_secs: default_keepa_timeout(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_scrape_timeout(),
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration for tests: loopback address, ephemeral port
    pub fn default_test_config() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 0,
            ..Self::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".into()));
        }
        if self.generation.model.trim().is_empty() {
            return Err(ConfigError::Invalid("generation.model must not be empty".into()));
        }
        for (name, secs) in [
            ("generation.timeout_secs", self.generation.timeout_secs),
            ("keepa.timeout_secs", self.keepa.timeout_secs),
            ("scrape.timeout_secs", self.scrape.timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::Invalid(format!("{} must be greater than 0", name)));
            }
        }
        Ok(())
    }

    /// Let the `PORT` environment variable override `bind_port`
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_port_override(std::env::var(PORT_VAR).ok().as_deref())
    }

    /// Override `bind_port` with `port` when present and non-blank
    pub fn apply_port_override(&mut self, port: Option<&str>) -> Result<(), ConfigError> {
        if let Some(port) = port.map(str::trim).filter(|p| !p.is_empty()) {
            self.bind_port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{} is not a valid port: {}", PORT_VAR, port)))?;
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    /// Directory export files are written to
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Chat-completions client for the `[generation]` section
    pub fn build_provider(&self, credentials: &Credentials) -> OpenAiProvider {
        OpenAiProvider::new(credentials.openai_api_key.clone(), self.generation.model.clone())
            .with_base_url(self.generation.base_url.clone())
            .with_timeout(Duration::from_secs(self.generation.timeout_secs))
    }

    /// Optimizer over `provider` with the configured persona and timeout
    pub fn build_optimizer<L>(&self, provider: L) -> Optimizer<L>
    where
        L: listwright_domain::traits::LlmProvider,
    {
        Optimizer::new(provider, self.generation.persona)
            .with_generation_timeout(Duration::from_secs(self.generation.timeout_secs))
    }

    /// The configured listing source
    pub fn build_source(&self, credentials: &Credentials) -> CatalogSource {
        match self.source {
            SourceKind::Keepa => KeepaSource::new(credentials.keepa_api_key.clone(), self.marketplace)
                .with_base_url(self.keepa.base_url.clone())
                .with_timeout(Duration::from_secs(self.keepa.timeout_secs))
                .into(),
            SourceKind::Scrape => {
                let mut source = ScrapeSource::new(self.marketplace)
                    .with_timeout(Duration::from_secs(self.scrape.timeout_secs));
                if let Some(base_url) = &self.scrape.base_url {
                    source = source.with_base_url(base_url.clone());
                }
                source.into()
            }
        }
    }
}

/// API keys read from the process environment
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Chat-completions API key
    pub openai_api_key: String,
    /// Keepa API key
    pub keepa_api_key: String,
}

impl Credentials {
    /// Read both keys from the environment
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read both keys through `lookup`; absent or blank values are errors
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingCredential(name))
        };

        Ok(Self {
            openai_api_key: require(OPENAI_API_KEY_VAR)?,
            keepa_api_key: require(KEEPA_API_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("keepa_api_key", &"<redacted>")
            .finish()
    }
}
