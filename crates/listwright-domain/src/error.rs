//! Error types shared across the capability boundaries

use thiserror::Error;

/// No identifier could be extracted from a line of user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Neither a bare ASIN nor a `/dp/` or `/gp/product/` URL
    #[error("Could not extract ASIN from: {input}")]
    NotFound {
        /// The trimmed input that failed to resolve
        input: String,
    },
}

/// Errors raised by a listing source while fetching one product
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The catalog has no product for this identifier
    #[error("No product found for ASIN {asin}")]
    NotFound {
        /// Identifier that was looked up
        asin: String,
    },

    /// Upstream answered with a non-success HTTP status
    #[error("HTTP {status} when fetching {url}")]
    HttpStatus {
        /// Numeric status code
        status: u16,
        /// URL that was requested, with credentials stripped
        url: String,
    },

    /// Connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Upstream reported an API-level error (bad key, no tokens left, ...)
    #[error("Upstream error: {0}")]
    Upstream(String),
}

/// Errors raised by a text-generation provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Provider answered but the payload was unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Credentials rejected by the provider
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}
