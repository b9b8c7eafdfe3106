//! Trait definitions for external interactions
//!
//! These traits define the boundaries between orchestration logic and the
//! services it delegates to. Implementations live in other crates; tests
//! substitute deterministic doubles.

use crate::{Asin, FetchError, GenerationError, ListingRecord};
use async_trait::async_trait;

/// Text-generation capability
///
/// One request with a fixed system instruction and a per-call user payload
/// yields one text completion, or an error.
///
/// Implemented by the infrastructure layer (listwright-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier sent with each request
    fn model(&self) -> &str;

    /// Generate a completion for a system/user message pair
    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError>;
}

/// Listing retrieval capability
///
/// Implementations are interchangeable: callers never know which source
/// produced a record.
///
/// Implemented by the infrastructure layer (listwright-catalog)
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Short human-readable source name, used in logs and error blocks
    fn name(&self) -> &str;

    /// Fetch and normalize the listing for one identifier
    async fn fetch(&self, asin: &Asin) -> Result<ListingRecord, FetchError>;
}

#[async_trait]
impl<T: LlmProvider + ?Sized> LlmProvider for std::sync::Arc<T> {
    fn model(&self) -> &str {
        (**self).model()
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        (**self).generate(system, user).await
    }
}

#[async_trait]
impl<T: ListingSource + ?Sized> ListingSource for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, asin: &Asin) -> Result<ListingRecord, FetchError> {
        (**self).fetch(asin).await
    }
}
