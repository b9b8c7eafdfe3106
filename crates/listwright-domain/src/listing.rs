//! Normalized listing records produced by listing sources

use crate::asin::Asin;
use serde::{Deserialize, Serialize};

/// The public-facing copy of one product, normalized across sources.
///
/// Every content field may be empty and each defaults independently: a record
/// with no title, no bullets and no description is still a successful fetch.
/// Failures are never stored here; sources return `Err(FetchError)` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    asin: Asin,
    title: String,
    bullets: Vec<String>,
    description: String,
}

impl ListingRecord {
    /// Create a record with empty content for `asin`
    ///
    /// # Examples
    ///
    /// ```
    /// use listwright_domain::{resolve, ListingRecord};
    ///
    /// let record = ListingRecord::new(resolve("B0DJ33ZFJH").unwrap())
    ///     .with_title("Kataifi Dough, 500g")
    ///     .with_bullets(vec!["Authentic".to_string(), "500g bag".to_string()]);
    ///
    /// assert_eq!(record.bullets_text(), "- Authentic\n- 500g bag");
    /// assert!(record.description().is_empty());
    /// ```
    pub fn new(asin: Asin) -> Self {
        Self {
            asin,
            title: String::new(),
            bullets: Vec::new(),
            description: String::new(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the bullet points, in display order
    pub fn with_bullets(mut self, bullets: Vec<String>) -> Self {
        self.bullets = bullets;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Product identifier
    pub fn asin(&self) -> &Asin {
        &self.asin
    }

    /// Title, possibly empty
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Bullet points, possibly empty
    pub fn bullets(&self) -> &[String] {
        &self.bullets
    }

    /// Description, possibly empty
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Bullets as `- item` lines joined by newlines
    pub fn bullets_text(&self) -> String {
        self.bullets
            .iter()
            .map(|b| format!("- {}", b))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// True when no content field carries any text
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.bullets.is_empty() && self.description.is_empty()
    }
}
