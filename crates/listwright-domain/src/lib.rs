//! Listwright Domain Layer
//!
//! This crate contains the core vocabulary shared by every other Listwright
//! crate: product identifiers, normalized listing records, marketplaces and the
//! trait interfaces for the two external capabilities (text generation and
//! listing retrieval).
//!
//! ## Key Concepts
//!
//! - **Asin**: Canonical 10-character product identifier, always uppercase
//! - **Resolver**: Extracts an Asin from a raw identifier or a marketplace URL
//! - **ListingRecord**: Normalized {title, bullets, description} for one Asin
//! - **Marketplace**: Storefront a listing is fetched from
//!
//! ## Architecture
//!
//! - No I/O in this crate
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod asin;
pub mod error;
pub mod listing;
pub mod marketplace;
pub mod traits;

// Re-exports for convenience
pub use asin::{resolve, Asin};
pub use error::{FetchError, GenerationError, ResolveError};
pub use listing::ListingRecord;
pub use marketplace::Marketplace;
