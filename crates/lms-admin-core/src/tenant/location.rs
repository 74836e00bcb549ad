//! Page location as seen by the tenant resolver

use crate::error::{Result, TenantError};
use std::str::FromStr;
use url::Url;

/// The parts of a page URL the resolver looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    hostname: String,
    pathname: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse an absolute URL such as `https://acme.lms.example.com/dashboard?tenant=x`
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href)
            .map_err(|e| TenantError::InvalidLocation(format!("{}: {}", href, e)))?;
        Ok(Self::from_url(&url))
    }

    pub fn from_url(url: &Url) -> Self {
        Self {
            hostname: url.host_str().unwrap_or_default().to_ascii_lowercase(),
            pathname: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl FromStr for Location {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
