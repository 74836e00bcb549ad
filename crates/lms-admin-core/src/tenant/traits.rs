//! Seams between the tenant store and its collaborators
//!
//! - `TenantSource` - loads a tenant configuration by domain
//! - `BrandingApplier` - pushes a tenant's branding onto the presentation surface

use crate::types::TenantConfig;
use async_trait::async_trait;

/// Loads tenant configurations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantSource: Send + Sync {
    /// Fetch a tenant by domain. `None` means "tenant not found", never a transient error.
    async fn fetch_by_domain(&self, domain: &str) -> Option<TenantConfig>;
}

/// Applies tenant branding
#[cfg_attr(test, mockall::automock)]
pub trait BrandingApplier: Send + Sync {
    /// Apply branding. Applying the same tenant twice must be observably a no-op.
    fn apply(&self, tenant: &TenantConfig);
}
