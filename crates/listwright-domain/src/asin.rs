//! Product identifiers and the resolver that extracts them from user input

use crate::error::ResolveError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Length of every Amazon Standard Identification Number
pub const ASIN_LEN: usize = 10;

/// `/dp/<ASIN>` or `/gp/product/<ASIN>`; the run after the capture must end.
static URL_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?i:dp|gp/product)/([A-Za-z0-9]{10})(?:[^A-Za-z0-9]|$)")
        .expect("ASIN URL pattern is valid")
});

/// Canonical product identifier.
///
/// Always exactly ten ASCII alphanumeric characters, stored uppercase.
/// The only ways to build one are [`resolve`] and [`FromStr`], so an `Asin`
/// in hand is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asin(String);

impl Asin {
    /// The identifier as an uppercase string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_token(token: &str) -> Self {
        Self(token.to_ascii_uppercase())
    }
}

fn is_bare_asin(s: &str) -> bool {
    s.len() == ASIN_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Extract a canonical [`Asin`] from free-form input.
///
/// Accepts either a raw identifier (`B0DJ33ZFJH`, any case, surrounding
/// whitespace ignored) or a marketplace URL containing `/dp/<ASIN>` or
/// `/gp/product/<ASIN>`. When a URL contains several candidates the leftmost
/// one wins. Runs longer than ten characters are rejected, not truncated.
///
/// # Examples
///
/// ```
/// use listwright_domain::resolve;
///
/// assert_eq!(resolve(" B0DJ33ZFJH ").unwrap().as_str(), "B0DJ33ZFJH");
/// assert_eq!(
///     resolve("https://www.amazon.com/dp/b0dj33zfjh").unwrap().as_str(),
///     "B0DJ33ZFJH"
/// );
/// assert!(resolve("not-an-asin").is_err());
/// ```
pub fn resolve(input: &str) -> Result<Asin, ResolveError> {
    let trimmed = input.trim();

    if is_bare_asin(trimmed) {
        return Ok(Asin::from_token(trimmed));
    }

    URL_PATH
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| Asin::from_token(m.as_str()))
        .ok_or_else(|| ResolveError::NotFound {
            input: trimmed.to_string(),
        })
}

impl FromStr for Asin {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

impl TryFrom<String> for Asin {
    type Error = ResolveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        resolve(&value)
    }
}

impl From<Asin> for String {
    fn from(asin: Asin) -> Self {
        asin.0
    }
}

impl AsRef<str> for Asin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
