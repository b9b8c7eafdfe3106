//! Listwright Catalog Layer
//!
//! Listing sources implementing the `ListingSource` trait from
//! `listwright-domain`. Every source turns an [`Asin`] into a normalized
//! [`ListingRecord`] or a [`FetchError`].
//!
//! # Sources
//!
//! - `KeepaSource`: Keepa product-data API
//! - `ScrapeSource`: Best-effort scrape of the public product page
//! - `MockSource`: Canned records for testing
//! - `CatalogSource`: One of the real sources, chosen by configuration

#![warn(missing_docs)]

pub mod keepa;
pub mod mock;
pub mod scrape;

use async_trait::async_trait;
use listwright_domain::traits::ListingSource;
use listwright_domain::{Asin, FetchError, ListingRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use keepa::KeepaSource;
pub use mock::MockSource;
pub use scrape::{parse_listing, ScrapeSource};

/// Which real source a process fetches listings from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Keepa product-data API (needs `KEEPA_API_KEY`)
    #[default]
    Keepa,
    /// HTML scrape of the storefront product page
    Scrape,
}

impl SourceKind {
    /// Lowercase name as used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Keepa => "keepa",
            SourceKind::Scrape => "scrape",
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keepa" => Ok(SourceKind::Keepa),
            "scrape" | "html" => Ok(SourceKind::Scrape),
            other => Err(format!("Unknown listing source: {}", other)),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The listing source selected at startup
///
/// Business logic receives this as `&dyn ListingSource` and never branches
/// on the variant.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// Keepa product-data API
    Keepa(KeepaSource),
    /// Product page scrape
    Scrape(ScrapeSource),
}

impl CatalogSource {
    /// Which kind of source this is
    pub fn kind(&self) -> SourceKind {
        match self {
            CatalogSource::Keepa(_) => SourceKind::Keepa,
            CatalogSource::Scrape(_) => SourceKind::Scrape,
        }
    }
}

impl From<KeepaSource> for CatalogSource {
    fn from(source: KeepaSource) -> Self {
        CatalogSource::Keepa(source)
    }
}

impl From<ScrapeSource> for CatalogSource {
    fn from(source: ScrapeSource) -> Self {
        CatalogSource::Scrape(source)
    }
}

#[async_trait]
impl ListingSource for CatalogSource {
    fn name(&self) -> &str {
        match self {
            CatalogSource::Keepa(s) => s.name(),
            CatalogSource::Scrape(s) => s.name(),
        }
    }

    async fn fetch(&self, asin: &Asin) -> Result<ListingRecord, FetchError> {
        match self {
            CatalogSource::Keepa(s) => s.fetch(asin).await,
            CatalogSource::Scrape(s) => s.fetch(asin).await,
        }
    }
}

/// Map a reqwest transport failure onto the shared error type
///
/// The request URL is dropped from the message: Keepa URLs carry the API key.
pub(crate) fn transport_error(e: reqwest::Error) -> FetchError {
    let e = e.without_url();
    if e.is_timeout() {
        FetchError::Transport(format!("Request timed out: {}", e))
    } else {
        FetchError::Transport(e.to_string())
    }
}
