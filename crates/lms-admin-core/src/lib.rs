//! LMS Admin Core Library
//!
//! This crate provides the non-presentation half of the LMS admin client's tenant theming:
//! - Tenant resolution from the page location and the persisted cache
//! - Tenant configuration fetching and the persisted tenant store
//! - The color palette API client and seed-based palette generation
//! - SQLite-backed client storage
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     lms-admin-core                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  tenant/       - Resolver, fetcher, tenant store            │
//! │  palette/      - Palette client, seed generation            │
//! │  storage/      - SQLite key/value storage                   │
//! │  types/        - Tenant and palette types                   │
//! │  config.rs     - Client configuration                       │
//! │  error.rs      - Error types                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod palette;
pub mod storage;
pub mod tenant;
pub mod types;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use types::*;

pub use palette::{generate_from_seed, PaletteClient};
pub use storage::Storage;
pub use tenant::{
    BrandingApplier, DetectionResult, Location, TenantApi, TenantSource, TenantState, TenantStore,
};
