//! Mock listing source for deterministic testing

use async_trait::async_trait;
use listwright_domain::traits::ListingSource;
use listwright_domain::{Asin, FetchError, ListingRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Listing source returning canned records without any network calls
///
/// Unknown identifiers fail with [`FetchError::NotFound`], like an empty
/// catalog lookup.
///
/// # Examples
///
/// ```
/// use listwright_catalog::MockSource;
/// use listwright_domain::traits::ListingSource;
/// use listwright_domain::{Asin, ListingRecord};
///
/// # let rt = tokio::runtime::Runtime::new().unwrap();
/// # rt.block_on(async {
/// let asin: Asin = "B0DJ33ZFJH".parse().unwrap();
/// let mut source = MockSource::new();
/// source.add_listing(ListingRecord::new(asin.clone()).with_title("Kataifi"));
///
/// assert_eq!(source.fetch(&asin).await.unwrap().title(), "Kataifi");
/// assert_eq!(source.fetch_count(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    entries: Arc<Mutex<HashMap<Asin, Result<ListingRecord, FetchError>>>>,
    fetches: Arc<Mutex<Vec<Asin>>>,
}

impl MockSource {
    /// Create an empty mock catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `record` for its identifier
    pub fn add_listing(&mut self, record: ListingRecord) {
        self.entries
            .lock()
            .unwrap()
            .insert(record.asin().clone(), Ok(record));
    }

    /// Fail with `error` for `asin`
    pub fn add_failure(&mut self, asin: Asin, error: FetchError) {
        self.entries.lock().unwrap().insert(asin, Err(error));
    }

    /// Number of fetches received so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    /// Identifiers fetched so far, oldest first
    pub fn fetched(&self) -> Vec<Asin> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingSource for MockSource {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch(&self, asin: &Asin) -> Result<ListingRecord, FetchError> {
        self.fetches.lock().unwrap().push(asin.clone());

        self.entries
            .lock()
            .unwrap()
            .get(asin)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::NotFound {
                    asin: asin.to_string(),
                })
            })
    }
}
