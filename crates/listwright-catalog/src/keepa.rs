//! Keepa product-data API source
//!
//! Looks up one ASIN per request with `GET /product` and maps the product's
//! `title`, `features` and `description` fields onto a [`ListingRecord`].
//! Missing fields become empty values.

use crate::transport_error;
use async_trait::async_trait;
use listwright_domain::traits::ListingSource;
use listwright_domain::{Asin, FetchError, ListingRecord, Marketplace};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Keepa API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.keepa.com";

/// Default timeout for Keepa requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Listing source backed by the Keepa API
#[derive(Clone)]
pub struct KeepaSource {
    api_key: String,
    marketplace: Marketplace,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    products: Option<Vec<KeepaProduct>>,
    #[serde(default)]
    error: Option<KeepaError>,
}

#[derive(Debug, Deserialize)]
struct KeepaProduct {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    features: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KeepaError {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl KeepaError {
    fn describe(&self) -> String {
        match (&self.kind, &self.message) {
            (Some(kind), Some(message)) => format!("{}: {}", kind, message),
            (None, Some(message)) => message.clone(),
            (Some(kind), None) => kind.clone(),
            (None, None) => "unspecified Keepa error".to_string(),
        }
    }
}

impl KeepaSource {
    /// Create a source for `marketplace` using the public Keepa endpoint
    pub fn new(api_key: impl Into<String>, marketplace: Marketplace) -> Self {
        Self {
            api_key: api_key.into(),
            marketplace,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: reqwest::Client::new(),
        }
    }

    /// Use a different API endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Marketplace queried by this source
    pub fn marketplace(&self) -> Marketplace {
        self.marketplace
    }

    /// Request URL without the API key, for logs and error messages
    fn display_url(&self, asin: &Asin) -> String {
        format!(
            "{}/product?domain={}&asin={}",
            self.base_url,
            self.marketplace.keepa_domain(),
            asin
        )
    }
}

fn into_record(asin: &Asin, product: KeepaProduct) -> ListingRecord {
    ListingRecord::new(asin.clone())
        .with_title(product.title.unwrap_or_default())
        .with_bullets(product.features.unwrap_or_default())
        .with_description(product.description.unwrap_or_default())
}

#[async_trait]
impl ListingSource for KeepaSource {
    fn name(&self) -> &str {
        "Keepa"
    }

    async fn fetch(&self, asin: &Asin) -> Result<ListingRecord, FetchError> {
        let domain = self.marketplace.keepa_domain().to_string();
        debug!(asin = %asin, domain = %domain, "Querying Keepa");

        let response = self
            .client
            .get(format!("{}/product", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("domain", domain.as_str()),
                ("asin", asin.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(asin = %asin, status = %status, "Keepa returned an error status");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: self.display_url(asin),
            });
        }

        let body: ProductResponse = response
            .json()
            .await
            .map_err(|e| {
                FetchError::InvalidResponse(format!(
                    "Failed to parse Keepa response: {}",
                    e.without_url()
                ))
            })?;

        if let Some(error) = body.error {
            return Err(FetchError::Upstream(error.describe()));
        }

        let product = body
            .products
            .and_then(|products| products.into_iter().next())
            .ok_or_else(|| FetchError::NotFound {
                asin: asin.to_string(),
            })?;

        Ok(into_record(asin, product))
    }
}

impl std::fmt::Debug for KeepaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeepaSource")
            .field("marketplace", &self.marketplace)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Fake Keepa: one known product, one with only a title, everything else empty
    async fn product(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        if params.get("key").map(String::as_str) != Some("good-key") {
            return (
                StatusCode::OK,
                Json(json!({"error": {"type": "invalidKey", "message": "Key is not valid"}})),
            );
        }
        if params.get("domain").map(String::as_str) != Some("1") {
            return (StatusCode::BAD_REQUEST, Json(json!({})));
        }
        let body = match params.get("asin").map(String::as_str) {
            Some("B0DJ33ZFJH") => json!({"products": [{
                "asin": "B0DJ33ZFJH",
                "title": "Kataifi Shredded Filo Dough, 500g",
                "features": ["Authentic kataifi", "500g bag"],
                "description": "Traditional shredded filo dough."
            }]}),
            Some("B000000001") => json!({"products": [{"asin": "B000000001", "title": "Title only", "features": null}]}),
            Some("B000000002") => json!({"products": [{"asin": "B000000002"}]}),
            _ => json!({"products": []}),
        };
        (StatusCode::OK, Json(body))
    }

    async fn source(key: &str) -> KeepaSource {
        let base = spawn_stub(Router::new().route("/product", get(product))).await;
        KeepaSource::new(key, Marketplace::Us).with_base_url(base)
    }

    fn asin(s: &str) -> Asin {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fetch_maps_all_fields() {
        let source = source("good-key").await;
        let record = source.fetch(&asin("B0DJ33ZFJH")).await.unwrap();

        assert_eq!(record.asin().as_str(), "B0DJ33ZFJH");
        assert_eq!(record.title(), "Kataifi Shredded Filo Dough, 500g");
        assert_eq!(record.bullets(), ["Authentic kataifi", "500g bag"]);
        assert_eq!(record.description(), "Traditional shredded filo dough.");
    }

    #[tokio::test]
    async fn test_missing_fields_default_to_empty() {
        let source = source("good-key").await;

        let record = source.fetch(&asin("B000000001")).await.unwrap();
        assert_eq!(record.title(), "Title only");
        assert!(record.bullets().is_empty());
        assert!(record.description().is_empty());

        let record = source.fetch(&asin("B000000002")).await.unwrap();
        assert!(record.is_blank());
    }

    #[tokio::test]
    async fn test_zero_products_is_not_found() {
        let source = source("good-key").await;
        let err = source.fetch(&asin("B0UNKNOWN0")).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::NotFound {
                asin: "B0UNKNOWN0".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_api_error_object_is_upstream() {
        let source = source("bad-key").await;
        let err = source.fetch(&asin("B0DJ33ZFJH")).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Upstream("invalidKey: Key is not valid".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_success_status_hides_key() {
        let base = spawn_stub(Router::new().route("/product", get(product))).await;
        let source = KeepaSource::new("good-key", Marketplace::De).with_base_url(base);

        let err = source.fetch(&asin("B0DJ33ZFJH")).await.unwrap_err();
        match err {
            FetchError::HttpStatus { status, url } => {
                assert_eq!(status, 400);
                assert!(url.contains("domain=3"));
                assert!(!url.contains("good-key"));
            }
            other => panic!("Expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let source = KeepaSource::new("SECRET-KEEPA-KEY", Marketplace::Us)
            .with_base_url("http://127.0.0.1:9");
        let err = source.fetch(&asin("B0DJ33ZFJH")).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.to_string().contains("SECRET-KEEPA-KEY"));
        assert!(!format!("{:?}", err).contains("SECRET-KEEPA-KEY"));
    }

    #[tokio::test]
    async fn test_undecodable_body_hides_key() {
        let base = spawn_stub(Router::new().route("/product", get(|| async { "not json" }))).await;
        let source = KeepaSource::new("SECRET-KEEPA-KEY", Marketplace::Us).with_base_url(base);

        let err = source.fetch(&asin("B0DJ33ZFJH")).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));
        assert!(err.to_string().contains("Failed to parse Keepa response"));
        assert!(!err.to_string().contains("SECRET-KEEPA-KEY"));
        assert!(!format!("{:?}", err).contains("SECRET-KEEPA-KEY"));
    }
}
