//! LMS Admin UI Library
//!
//! Presentation half of the LMS admin client's tenant theming.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌─────────────────────┐
//! │ Resolver     │──▶│ TenantApi    │──▶│ TenantStore  │──▶│ BrandingApplicator  │
//! │ (core)       │   │ (core)       │   │ (core)       │   │ ──▶ ThemeSink       │
//! └──────────────┘   └──────────────┘   └──────────────┘   │     (Document)      │
//!                                                          └─────────────────────┘
//! ```
//!
//! [`AppState`] is the composition root wiring these together.

pub mod state;
pub mod theme;

// Re-exports
pub use state::AppState;
pub use theme::{BrandingApplicator, Document, DocumentSnapshot, ThemeSink};
