//! Listwright LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `listwright-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use listwright_llm::MockProvider;
//! use listwright_domain::traits::LlmProvider;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("system", "test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use listwright_domain::traits::LlmProvider;
use listwright_domain::GenerationError;
use std::sync::{Arc, Mutex};

pub use openai::OpenAiProvider;

/// One recorded call to [`MockProvider::generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// System payload
    pub system: String,
    /// User payload
    pub user: String,
}

#[derive(Debug, Clone)]
enum Canned {
    Text(String),
    Error(GenerationError),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// A response registered with [`add_response`](Self::add_response) is used
/// whenever the user payload contains its trigger; the first matching trigger
/// in registration order wins, otherwise the default response is returned.
///
/// # Examples
///
/// ```
/// use listwright_llm::MockProvider;
/// use listwright_domain::traits::LlmProvider;
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let mut provider = MockProvider::default();
/// provider.add_response("auditing", "audit text");
/// provider.add_response("rewrite", "rewrite text");
///
/// assert_eq!(provider.generate("sys", "You are auditing ...").await.unwrap(), "audit text");
/// assert_eq!(provider.generate("sys", "Now rewrite ...").await.unwrap(), "rewrite text");
/// assert_eq!(provider.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, Canned)>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Respond with `response` when the user payload contains `trigger`
    pub fn add_response(&mut self, trigger: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((trigger.into(), Canned::Text(response.into())));
    }

    /// Fail with `error` when the user payload contains `trigger`
    pub fn add_error(&mut self, trigger: impl Into<String>, error: GenerationError) {
        self.responses
            .lock()
            .unwrap()
            .push((trigger.into(), Canned::Error(error)));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
        });

        let responses = self.responses.lock().unwrap();
        match responses.iter().find(|(trigger, _)| user.contains(trigger.as_str())) {
            Some((_, Canned::Text(text))) => Ok(text.clone()),
            Some((_, Canned::Error(err))) => Err(err.clone()),
            None => Ok(self.default_response.clone()),
        }
    }
}
