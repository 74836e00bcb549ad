//! Tenant resolution from the page location and the persisted cache
//!
//! Signals are checked in a fixed order, first match wins:
//! subdomain, `/tenant/<slug>` path, `?tenant=<slug>` query, cached tenant, default.

use super::Location;
use crate::error::Result;
use crate::storage::Storage;
use crate::types::{DetectionMethod, TenantConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Storage key holding the serialized `TenantConfig`
pub const CURRENT_TENANT_KEY: &str = "current_tenant";

/// Domain used when the location carries no tenant signal
pub const FALLBACK_TENANT_DOMAIN: &str = "default";

static TENANT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/tenant/([^/]+)").expect("tenant path pattern is valid"));

const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Outcome of tenant detection
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub method: DetectionMethod,
    pub is_valid: bool,
    pub error: Option<String>,
    /// Set only for cache hits, which skip the network
    pub tenant: Option<TenantConfig>,
}

impl DetectionResult {
    fn found(method: DetectionMethod) -> Self {
        Self {
            method,
            is_valid: true,
            error: None,
            tenant: None,
        }
    }
}

/// Detect how the current tenant is identified
pub fn detect(location: &Location, storage: &Storage) -> DetectionResult {
    if subdomain(location).is_some() {
        return DetectionResult::found(DetectionMethod::Subdomain);
    }

    if path_slug(location).is_some() {
        return DetectionResult::found(DetectionMethod::Path);
    }

    if query_slug(location).is_some() {
        return DetectionResult::found(DetectionMethod::Query);
    }

    if let Some(tenant) = read_cached_tenant(storage) {
        debug!("Tenant {} resolved from cache", tenant.id);
        return DetectionResult {
            method: DetectionMethod::Cache,
            is_valid: true,
            error: None,
            tenant: Some(tenant),
        };
    }

    DetectionResult {
        method: DetectionMethod::Default,
        is_valid: false,
        error: Some("No tenant signal found in URL or cache".to_string()),
        tenant: None,
    }
}

/// The literal tenant domain/slug for a location, using the same priority as [`detect`]
pub fn tenant_domain(location: &Location) -> String {
    subdomain(location)
        .map(str::to_string)
        .or_else(|| path_slug(location))
        .or_else(|| query_slug(location))
        .unwrap_or_else(|| FALLBACK_TENANT_DOMAIN.to_string())
}

fn subdomain(location: &Location) -> Option<&str> {
    let hostname = location.hostname();
    if !hostname.contains('.') || LOCAL_HOSTS.contains(&hostname) {
        return None;
    }
    hostname.split('.').next().filter(|label| !label.is_empty())
}

fn path_slug(location: &Location) -> Option<String> {
    TENANT_PATH
        .captures(location.pathname())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn query_slug(location: &Location) -> Option<String> {
    location
        .query_param("tenant")
        .filter(|slug| !slug.is_empty())
        .map(str::to_string)
}

/// Read the cached tenant. A malformed entry is deleted and reported as a miss.
pub fn read_cached_tenant(storage: &Storage) -> Option<TenantConfig> {
    let raw = match storage.get_item(CURRENT_TENANT_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Failed to read cached tenant: {}", e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(tenant) => Some(tenant),
        Err(e) => {
            warn!("Discarding malformed cached tenant: {}", e);
            if let Err(e) = storage.remove_item(CURRENT_TENANT_KEY) {
                warn!("Failed to remove malformed cached tenant: {}", e);
            }
            None
        }
    }
}

/// Write the tenant cache
pub fn cache_tenant(storage: &Storage, tenant: &TenantConfig) -> Result<()> {
    storage.set_json(CURRENT_TENANT_KEY, tenant)
}

/// Purge the tenant cache
pub fn clear_cached_tenant(storage: &Storage) -> Result<()> {
    storage.remove_item(CURRENT_TENANT_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn location(href: &str) -> Location {
        Location::parse(href).unwrap()
    }

    fn tenant() -> TenantConfig {
        TenantConfig {
            id: "t-1".to_string(),
            name: "Acme".to_string(),
            domain: "acme".to_string(),
            ..TenantConfig::default()
        }
    }

    #[test]
    fn test_detect_subdomain() {
        let storage = Storage::in_memory().unwrap();
        let result = detect(&location("https://acme.lms.example.com/dashboard"), &storage);
        assert_eq!(result.method, DetectionMethod::Subdomain);
        assert!(result.is_valid);
        assert!(result.tenant.is_none());
    }

    #[test]
    fn test_detect_path() {
        let storage = Storage::in_memory().unwrap();
        let result = detect(&location("http://localhost:5173/tenant/acme/courses"), &storage);
        assert_eq!(result.method, DetectionMethod::Path);
        assert!(result.is_valid);
    }

    #[test]
    fn test_detect_query() {
        let storage = Storage::in_memory().unwrap();
        let result = detect(&location("http://localhost:5173/dashboard?tenant=acme"), &storage);
        assert_eq!(result.method, DetectionMethod::Query);
        assert!(result.is_valid);
    }

    #[test]
    fn test_detect_default_on_bare_localhost() {
        let storage = Storage::in_memory().unwrap();
        let result = detect(&location("http://localhost:5173/"), &storage);
        assert_eq!(result.method, DetectionMethod::Default);
        assert!(!result.is_valid);
        assert!(result.error.is_some());

        let result = detect(&location("http://127.0.0.1:8080/"), &storage);
        assert_eq!(result.method, DetectionMethod::Default);
    }

    #[test]
    fn test_priority_order() {
        let storage = Storage::in_memory().unwrap();
        cache_tenant(&storage, &tenant()).unwrap();

        let all = location("https://acme.example.com/tenant/other?tenant=third");
        assert_eq!(detect(&all, &storage).method, DetectionMethod::Subdomain);

        let path_and_query = location("http://localhost/tenant/other?tenant=third");
        assert_eq!(detect(&path_and_query, &storage).method, DetectionMethod::Path);

        let query_and_cache = location("http://localhost/?tenant=third");
        assert_eq!(detect(&query_and_cache, &storage).method, DetectionMethod::Query);

        let cache_only = location("http://localhost/");
        assert_eq!(detect(&cache_only, &storage).method, DetectionMethod::Cache);
    }

    #[test]
    fn test_cache_hit_returns_tenant() {
        let storage = Storage::in_memory().unwrap();
        cache_tenant(&storage, &tenant()).unwrap();

        let result = detect(&location("http://localhost/"), &storage);
        assert_eq!(result.method, DetectionMethod::Cache);
        assert_eq!(result.tenant, Some(tenant()));
    }

    #[test]
    fn test_malformed_cache_is_removed() {
        let storage = Storage::in_memory().unwrap();
        storage.set_item(CURRENT_TENANT_KEY, "{\"id\": ").unwrap();

        let result = detect(&location("http://localhost/"), &storage);
        assert_eq!(result.method, DetectionMethod::Default);
        assert!(!result.is_valid);
        assert!(storage.get_item(CURRENT_TENANT_KEY).unwrap().is_none());
    }

    #[test]
    fn test_tenant_domain_accessor() {
        assert_eq!(tenant_domain(&location("https://acme.lms.example.com/")), "acme");
        assert_eq!(tenant_domain(&location("http://localhost/tenant/beta/x")), "beta");
        assert_eq!(tenant_domain(&location("http://localhost/?tenant=gamma")), "gamma");
        assert_eq!(tenant_domain(&location("http://localhost/")), FALLBACK_TENANT_DOMAIN);
        assert_eq!(
            tenant_domain(&location("https://acme.example.com/tenant/beta?tenant=gamma")),
            "acme"
        );
    }

    #[test]
    fn test_empty_query_value_is_ignored() {
        let storage = Storage::in_memory().unwrap();
        let result = detect(&location("http://localhost/?tenant="), &storage);
        assert_eq!(result.method, DetectionMethod::Default);
    }
}
