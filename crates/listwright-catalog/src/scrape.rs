//! Product page scraper
//!
//! Fetches `https://<storefront>/dp/<ASIN>` with a browser User-Agent and
//! pulls the listing copy out with CSS selectors. Extraction is best effort:
//! each field falls back to empty on its own, and a page with none of the
//! expected containers is still a successful (blank) record.
//!
//! Limitations:
//! - No JavaScript rendering
//! - Storefronts may answer bots with a captcha page, which parses as blank

use crate::transport_error;
use async_trait::async_trait;
use listwright_domain::traits::ListingSource;
use listwright_domain::{Asin, FetchError, ListingRecord, Marketplace};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for page requests (15 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Desktop Chrome User-Agent so the storefront serves the regular page
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Bullets containing this text are UI chrome, not product copy
const EXPANDER_ARTIFACT: &str = "click to open expanded";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("#productTitle"));
static BULLETS: LazyLock<Selector> = LazyLock::new(|| selector("#feature-bullets ul li span"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| selector("#productDescription"));
static DESCRIPTION_FALLBACK: LazyLock<Selector> =
    LazyLock::new(|| selector("#bookDescription_feature_div"));

/// Listing source that scrapes the public product page
#[derive(Debug, Clone)]
pub struct ScrapeSource {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl ScrapeSource {
    /// Create a scraper for the given storefront
    pub fn new(marketplace: Marketplace) -> Self {
        Self {
            base_url: marketplace.base_url(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch pages from a different origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Product page URL for `asin`
    pub fn product_url(&self, asin: &Asin) -> String {
        format!("{}/dp/{}", self.base_url, asin)
    }
}

/// Text of an element: trimmed text nodes joined by single spaces
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// Extract a listing from a product page.
///
/// Title, bullets and description default independently to empty.
pub fn parse_listing(asin: &Asin, html: &str) -> ListingRecord {
    let document = Html::parse_document(html);

    let title = first_text(&document, &TITLE).unwrap_or_default();

    let bullets: Vec<String> = document
        .select(&BULLETS)
        .map(element_text)
        .filter(|t| !t.is_empty() && !t.to_lowercase().contains(EXPANDER_ARTIFACT))
        .collect();

    let description = first_text(&document, &DESCRIPTION)
        .or_else(|| first_text(&document, &DESCRIPTION_FALLBACK))
        .unwrap_or_default();

    ListingRecord::new(asin.clone())
        .with_title(title)
        .with_bullets(bullets)
        .with_description(description)
}

#[async_trait]
impl ListingSource for ScrapeSource {
    fn name(&self) -> &str {
        "Amazon page"
    }

    async fn fetch(&self, asin: &Asin) -> Result<ListingRecord, FetchError> {
        let url = self.product_url(asin);
        debug!(url = %url, "Fetching product page");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!(url = %url, status = %status, "Product page fetch failed");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("Failed to read page body: {}", e)))?;

        let record = parse_listing(asin, &html);
        if record.is_blank() {
            warn!(asin = %asin, "Product page parsed but no listing fields were found");
        }
        Ok(record)
    }
}
