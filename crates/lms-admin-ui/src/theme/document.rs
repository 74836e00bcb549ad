//! In-memory document model

use super::{DocumentSnapshot, ThemeSink};
use std::collections::BTreeMap;
use std::fmt::Write;

/// A `<link>` element in the document head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub rel: String,
    pub href: String,
}

/// The parts of an HTML document tenant branding touches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    root_style: BTreeMap<String, String>,
    root_attributes: BTreeMap<String, String>,
    title: String,
    head_links: Vec<LinkElement>,
    body_class: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.root_style.get(name).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.root_style
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn head_links(&self) -> &[LinkElement] {
        &self.head_links
    }

    pub fn favicon(&self) -> Option<&str> {
        self.head_links
            .iter()
            .find(|link| link.rel == "icon")
            .map(|link| link.href.as_str())
    }

    /// Individual body classes
    pub fn class_list(&self) -> Vec<&str> {
        self.body_class.split_whitespace().collect()
    }

    /// Render the root custom properties as a CSS rule
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.root_style {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push_str("}\n");
        css
    }
}

impl ThemeSink for Document {
    fn set_property(&mut self, name: &str, value: &str) {
        self.root_style.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.root_style.remove(name);
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn upsert_favicon(&mut self, href: &str) {
        match self.head_links.iter_mut().find(|link| link.rel == "icon") {
            Some(link) => link.href = href.to_string(),
            None => self.head_links.push(LinkElement {
                rel: "icon".to_string(),
                href: href.to_string(),
            }),
        }
    }

    fn remove_favicon(&mut self) {
        self.head_links.retain(|link| link.rel != "icon");
    }

    fn body_class(&self) -> String {
        self.body_class.clone()
    }

    fn set_body_class(&mut self, class: &str) {
        self.body_class = class.to_string();
    }

    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            properties: self.root_style.clone(),
            root_attributes: self.root_attributes.clone(),
            title: self.title.clone(),
            favicon: self.favicon().map(str::to_string),
            body_class: self.body_class.clone(),
        }
    }

    fn restore(&mut self, snapshot: &DocumentSnapshot) {
        self.root_style = snapshot.properties.clone();
        self.root_attributes = snapshot.root_attributes.clone();
        self.title = snapshot.title.clone();
        self.body_class = snapshot.body_class.clone();
        match &snapshot.favicon {
            Some(href) => self.upsert_favicon(href),
            None => self.remove_favicon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favicon_upsert_reuses_existing_link() {
        let mut doc = Document::new();
        doc.upsert_favicon("/a.ico");
        doc.upsert_favicon("/b.ico");

        assert_eq!(doc.head_links().len(), 1);
        assert_eq!(doc.favicon(), Some("/b.ico"));
    }

    #[test]
    fn test_to_css_is_sorted() {
        let mut doc = Document::new();
        doc.set_property("--radius", "4px");
        doc.set_property("--primary", "#ff0000");

        assert_eq!(doc.to_css(), ":root {\n  --primary: #ff0000;\n  --radius: 4px;\n}\n");
    }

    #[test]
    fn test_restore_snapshot() {
        let mut doc = Document::new();
        doc.set_title("Before");
        let before = doc.snapshot();

        doc.set_title("After");
        doc.set_property("--primary", "#000");
        doc.upsert_favicon("/x.ico");
        doc.restore(&before);

        assert_eq!(doc.snapshot(), before);
        assert!(doc.favicon().is_none());
    }
}
