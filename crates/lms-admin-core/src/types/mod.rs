//! Core type definitions for the LMS admin client
//!
//! Tenant configuration, theme scales, and color palettes exchanged with the REST API.

mod palette_types;
mod tenant_types;

pub use palette_types::*;
pub use tenant_types::*;

use serde::{Deserialize, Serialize};

/// `{ data: T }` envelope used by the theme endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Tenant header values sent with authenticated calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantContext {
    pub tenant_id: String,
    pub tenant_domain: String,
}

impl TenantContext {
    pub fn new(tenant_id: impl Into<String>, tenant_domain: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            tenant_domain: tenant_domain.into(),
        }
    }
}

impl From<&TenantConfig> for TenantContext {
    fn from(tenant: &TenantConfig) -> Self {
        Self::new(tenant.id.clone(), tenant.domain.clone())
    }
}
