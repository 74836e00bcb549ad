//! Tenant resolution, loading and state
//!
//! Data flows resolver -> fetcher -> store -> branding applier:
//! - `resolver` - identifies the tenant from the page location or the cache
//! - `fetcher` - loads tenant configurations over REST
//! - `store` - persisted state container driving the other two

mod fetcher;
mod location;
pub mod resolver;
mod store;
mod traits;

pub use fetcher::TenantApi;
pub use location::Location;
pub use resolver::{
    detect, tenant_domain, DetectionResult, CURRENT_TENANT_KEY, FALLBACK_TENANT_DOMAIN,
};
pub use store::{PersistedTenantState, TenantState, TenantStore, TENANT_STORAGE_KEY};
pub use traits::{BrandingApplier, TenantSource};

#[cfg(test)]
pub use traits::{MockBrandingApplier, MockTenantSource};
