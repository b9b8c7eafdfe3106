//! OpenAI Provider Implementation
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint.
//!
//! # Features
//!
//! - Async HTTP communication via reqwest
//! - Configurable base URL, model and request timeout
//! - One request per call: no retries, errors surface to the caller
//!
//! # Examples
//!
//! ```no_run
//! use listwright_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4.1-mini");
//! ```

use async_trait::async_trait;
use listwright_domain::traits::LlmProvider;
use listwright_domain::GenerationError;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for both audit and rewrite calls
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// OpenAI chat-completions provider
#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider against the public OpenAI endpoint
    ///
    /// # Parameters
    ///
    /// - `api_key`: Bearer token
    /// - `model`: Model to use (e.g., "gpt-4.1-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: reqwest::Client::new(),
        }
    }

    /// Point the provider at a different OpenAI-compatible endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_status(&self, status: reqwest::StatusCode, body: String) -> GenerationError {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                GenerationError::Unauthorized(format!("HTTP {}", status))
            }
            reqwest::StatusCode::NOT_FOUND => GenerationError::ModelNotAvailable(self.model.clone()),
            reqwest::StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimitExceeded,
            _ => GenerationError::Communication(format!("HTTP {}: {}", status, body)),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.base_url);
        let start = Instant::now();

        let request_body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "LLM request failed");
                GenerationError::Communication(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = %status, "LLM API error");
            return Err(self.map_status(status, error_text));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationError::InvalidResponse("No completion returned".to_string()))?;

        debug!(
            model = %self.model,
            system_chars = system.len(),
            user_chars = user.len(),
            response_chars = content.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "LLM chat completion"
        );

        Ok(content)
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
