//! Presentation surface the branding applicator writes into

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the applicator can observe or change, captured at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub properties: BTreeMap<String, String>,
    pub root_attributes: BTreeMap<String, String>,
    pub title: String,
    pub favicon: Option<String>,
    pub body_class: String,
}

/// A document-like target for tenant branding
pub trait ThemeSink: Send + Sync {
    /// Set a CSS custom property on the root element
    fn set_property(&mut self, name: &str, value: &str);

    /// Remove a CSS custom property from the root element
    fn remove_property(&mut self, name: &str);

    /// Set an attribute on the root element
    fn set_root_attribute(&mut self, name: &str, value: &str);

    fn set_title(&mut self, title: &str);

    /// Point the `<link rel="icon">` element at `href`, creating it if missing
    fn upsert_favicon(&mut self, href: &str);

    /// Drop the `<link rel="icon">` element, if any
    fn remove_favicon(&mut self);

    fn body_class(&self) -> String;

    fn set_body_class(&mut self, class: &str);

    fn snapshot(&self) -> DocumentSnapshot;

    /// Put the sink back into a previously captured state
    fn restore(&mut self, snapshot: &DocumentSnapshot);
}
