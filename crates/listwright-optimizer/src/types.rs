//! Request and response types for the copy-generation pipeline

use listwright_domain::ListingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The listing text the pipeline works on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFields {
    /// Current title
    #[serde(default)]
    pub title: String,

    /// Current bullet points as free text
    #[serde(default)]
    pub bullets: String,

    /// Current description
    #[serde(default)]
    pub description: String,

    /// Reviews or voice-of-customer snippets (optional)
    #[serde(default)]
    pub reviews: String,
}

impl From<&ListingRecord> for ListingFields {
    fn from(record: &ListingRecord) -> Self {
        Self {
            title: record.title().to_string(),
            bullets: record.bullets_text(),
            description: record.description().to_string(),
            reviews: String::new(),
        }
    }
}

/// Targeting context shared by every listing in a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targeting {
    /// Target keywords, comma separated
    #[serde(default)]
    pub keywords: String,

    /// Marketplace category path
    #[serde(default)]
    pub category: String,

    /// Intended audience
    #[serde(default)]
    pub audience: String,
}

/// Generated critique of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditResult(String);

/// Generated replacement copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewriteResult(String);

macro_rules! text_result {
    ($name:ident) => {
        impl $name {
            /// Wrap generated text
            pub fn new(text: impl Into<String>) -> Self {
                Self(text.into())
            }

            /// The generated text
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Take the generated text
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_result!(AuditResult);
text_result!(RewriteResult);

/// Outcome of the single-item flow: both generated texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualResult {
    /// Audit pass output
    pub audit: AuditResult,

    /// Rewrite pass output
    pub rewrite: RewriteResult,
}
