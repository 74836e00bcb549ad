//! Client configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Default REST API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "LMS_API_BASE";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "LMS_DATA_DIR";

/// Configuration shared by every API client and the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL the `/v1/...` paths are appended to
    pub api_base: String,
    /// Directory holding the persisted client state
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `LMS_API_BASE` and `LMS_DATA_DIR` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(api_base) = std::env::var(API_BASE_ENV) {
            if !api_base.trim().is_empty() {
                config.api_base = api_base;
            }
        }
        if let Ok(data_dir) = std::env::var(DATA_DIR_ENV) {
            if !data_dir.trim().is_empty() {
                config.data_dir = PathBuf::from(data_dir);
            }
        }
        config
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// Empty, `.` and `..` segments are rejected so caller-supplied values such as tenant
    /// slugs can never walk to a different endpoint.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| segment.is_empty() || **segment == "." || **segment == "..")
        {
            return Err(Error::InvalidUrl(format!("invalid path segment {:?}", bad)));
        }

        let mut url = Url::parse(&self.api_base).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base URL", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("lms-admin"))
        .unwrap_or_else(|| PathBuf::from(".lms-admin"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let config = ClientConfig::default().with_api_base("https://api.example.com/api/");
        let url = config.endpoint(&["v1", "tenants", "domain", "acme"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/v1/tenants/domain/acme");
    }

    #[test]
    fn test_endpoint_encodes_slashes_in_segments() {
        let config = ClientConfig::default().with_api_base("http://localhost:3000/api");
        let url = config
            .endpoint(&["v1", "tenants", "domain", "x/../../users"])
            .unwrap();
        assert_eq!(url.path(), "/api/v1/tenants/domain/x%2F..%2F..%2Fusers");
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let config = ClientConfig::default();
        assert!(matches!(
            config.endpoint(&["v1", "tenants", "domain", ".."]),
            Err(Error::InvalidUrl(_))
        ));
        assert!(config.endpoint(&["v1", "tenants", "domain", ""]).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.data_dir.ends_with("lms-admin") || config.data_dir.ends_with(".lms-admin"));
    }
}
