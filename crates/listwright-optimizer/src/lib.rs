//! Listwright Optimizer
//!
//! Two-pass copy generation for marketplace listings: an audit call that
//! critiques the current copy, then a rewrite call that uses the audit as
//! its improvement plan.
//!
//! # Architecture
//!
//! ```text
//! Identifier → resolve → ListingSource → Optimizer::audit → Optimizer::rewrite → render → export
//! ```
//!
//! # Key Features
//!
//! - **Manual flow**: Optimize pasted listing text with [`Optimizer::optimize`]
//! - **Batch flow**: Many identifiers, one block each, via [`Optimizer::run_batch`]
//! - **Personas**: Fixed rewrite voices selected in configuration
//! - **Export**: Plain-text files with [`export_manual`] and [`export_batch`]
//! - **Configuration**: TOML [`AppConfig`] plus environment [`Credentials`]
//!
//! # Example Usage
//!
//! ```
//! use listwright_optimizer::{ListingFields, Optimizer, Persona, Targeting};
//! use listwright_llm::MockProvider;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let optimizer = Optimizer::new(MockProvider::new("generated"), Persona::NeutralSeo);
//!
//! let listing = ListingFields {
//!     title: "Kataifi Dough".to_string(),
//!     ..Default::default()
//! };
//! let targeting = Targeting {
//!     keywords: "kataifi, shredded phyllo".to_string(),
//!     ..Default::default()
//! };
//!
//! let result = optimizer.optimize(&listing, &targeting).await.unwrap();
//! assert_eq!(result.audit.as_str(), "generated");
//! assert_eq!(result.rewrite.as_str(), "generated");
//! # });
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod export;
mod optimizer;
mod persona;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use batch::{BatchItem, BatchReport, FailureStage, ItemOutcome, EMPTY_BATCH_MESSAGE};
pub use config::{
    AppConfig, Credentials, GenerationConfig, KeepaConfig, ScrapeConfig, KEEPA_API_KEY_VAR,
    OPENAI_API_KEY_VAR, PORT_VAR,
};
pub use error::{ConfigError, ExportError, OptimizerError};
pub use export::{export_batch, export_manual, AUDIT_MARKER, REWRITE_MARKER};
pub use optimizer::{Optimizer, DEFAULT_GENERATION_TIMEOUT_SECS};
pub use persona::{Persona, AUDITOR_SYSTEM_PROMPT};
pub use prompt::{AuditPrompt, RewritePrompt};
pub use types::{AuditResult, ListingFields, ManualResult, RewriteResult, Targeting};
