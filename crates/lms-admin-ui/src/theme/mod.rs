//! Theme system for the LMS admin client
//!
//! Tenant branding is written through the [`ThemeSink`] abstraction; [`Document`] is the
//! in-memory implementation used by the CLI and the tests.

mod applicator;
pub mod css;
mod document;
mod sink;

pub use applicator::{BrandingApplicator, THEME_ATTRIBUTE};
pub use document::{Document, LinkElement};
pub use sink::{DocumentSnapshot, ThemeSink};
