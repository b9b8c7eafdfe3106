//! Amazon storefronts a listing can be fetched from

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A regional Amazon storefront.
///
/// Carries the Keepa domain code and the public storefront host for the
/// region. `US` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Marketplace {
    /// amazon.com
    #[default]
    Us,
    /// amazon.co.uk
    Gb,
    /// amazon.de
    De,
    /// amazon.fr
    Fr,
    /// amazon.co.jp
    Jp,
    /// amazon.ca
    Ca,
    /// amazon.it
    It,
    /// amazon.es
    Es,
    /// amazon.in
    In,
    /// amazon.com.mx
    Mx,
    /// amazon.com.br
    Br,
}

impl Marketplace {
    /// Every supported marketplace
    pub const ALL: [Marketplace; 11] = [
        Marketplace::Us,
        Marketplace::Gb,
        Marketplace::De,
        Marketplace::Fr,
        Marketplace::Jp,
        Marketplace::Ca,
        Marketplace::It,
        Marketplace::Es,
        Marketplace::In,
        Marketplace::Mx,
        Marketplace::Br,
    ];

    /// Two-letter code (`US`, `GB`, ...)
    pub fn code(&self) -> &'static str {
        match self {
            Marketplace::Us => "US",
            Marketplace::Gb => "GB",
            Marketplace::De => "DE",
            Marketplace::Fr => "FR",
            Marketplace::Jp => "JP",
            Marketplace::Ca => "CA",
            Marketplace::It => "IT",
            Marketplace::Es => "ES",
            Marketplace::In => "IN",
            Marketplace::Mx => "MX",
            Marketplace::Br => "BR",
        }
    }

    /// Numeric domain id used by the Keepa API
    pub fn keepa_domain(&self) -> u8 {
        match self {
            Marketplace::Us => 1,
            Marketplace::Gb => 2,
            Marketplace::De => 3,
            Marketplace::Fr => 4,
            Marketplace::Jp => 5,
            Marketplace::Ca => 6,
            Marketplace::It => 8,
            Marketplace::Es => 9,
            Marketplace::In => 10,
            Marketplace::Mx => 11,
            Marketplace::Br => 12,
        }
    }

    /// Storefront host name
    pub fn host(&self) -> &'static str {
        match self {
            Marketplace::Us => "www.amazon.com",
            Marketplace::Gb => "www.amazon.co.uk",
            Marketplace::De => "www.amazon.de",
            Marketplace::Fr => "www.amazon.fr",
            Marketplace::Jp => "www.amazon.co.jp",
            Marketplace::Ca => "www.amazon.ca",
            Marketplace::It => "www.amazon.it",
            Marketplace::Es => "www.amazon.es",
            Marketplace::In => "www.amazon.in",
            Marketplace::Mx => "www.amazon.com.mx",
            Marketplace::Br => "www.amazon.com.br",
        }
    }

    /// `https://<host>` for this storefront
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host())
    }
}

impl FromStr for Marketplace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if code == "UK" {
            return Ok(Marketplace::Gb);
        }
        Marketplace::ALL
            .into_iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| format!("Unknown marketplace: {}", s))
    }
}

impl TryFrom<String> for Marketplace {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Marketplace> for String {
    fn from(m: Marketplace) -> Self {
        m.code().to_string()
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
