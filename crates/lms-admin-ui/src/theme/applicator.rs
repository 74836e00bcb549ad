//! Branding applicator
//!
//! Single entry point that pushes a tenant's branding into a [`ThemeSink`]. Application is
//! idempotent and only ever undoes its own writes: properties, body classes and the favicon
//! set by an earlier application but absent from the current tenant are removed or put back,
//! while anything else on the document is left alone.

use super::css::branding_properties;
use super::{DocumentSnapshot, ThemeSink};
use lms_admin_core::{BrandingApplier, TenantConfig, ThemeConfig};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Root attribute carrying the theme mode
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// What the last application wrote into the sink
#[derive(Debug, Default)]
struct Written {
    properties: BTreeSet<String>,
    body_classes: Vec<String>,
    /// Favicon in place before the first tenant favicon was written
    favicon_before: Option<Option<String>>,
}

/// Writes tenant branding into a shared sink
pub struct BrandingApplicator<S: ThemeSink> {
    sink: Arc<RwLock<S>>,
    written: Mutex<Written>,
}

impl<S: ThemeSink> BrandingApplicator<S> {
    pub fn new(sink: Arc<RwLock<S>>) -> Self {
        Self {
            sink,
            written: Mutex::new(Written::default()),
        }
    }

    pub fn sink(&self) -> Arc<RwLock<S>> {
        self.sink.clone()
    }

    /// Apply branding and return the state the sink was in before
    pub fn apply_tenant(&self, tenant: &TenantConfig) -> DocumentSnapshot {
        let mut written = self.written.lock();
        let mut sink = self.sink.write();
        let previous = sink.snapshot();

        let default_theme = ThemeConfig::default();
        let theme = tenant.theme().unwrap_or(&default_theme);
        let properties = branding_properties(tenant);

        for stale in written
            .properties
            .iter()
            .filter(|name| !properties.contains_key(*name))
        {
            sink.remove_property(stale);
        }
        for (name, value) in &properties {
            sink.set_property(name, value);
        }
        written.properties = properties.keys().cloned().collect();

        sink.set_root_attribute(THEME_ATTRIBUTE, theme.mode.as_str());
        sink.set_title(&format!("{} - LMS", tenant.display_name()));

        match tenant
            .settings
            .branding
            .favicon_url
            .as_deref()
            .filter(|href| !href.is_empty())
        {
            Some(favicon) => {
                if written.favicon_before.is_none() {
                    written.favicon_before = Some(previous.favicon.clone());
                }
                sink.upsert_favicon(favicon);
            }
            None => match written.favicon_before.take() {
                Some(Some(original)) => sink.upsert_favicon(&original),
                Some(None) => sink.remove_favicon(),
                None => {}
            },
        }

        let classes = theme_classes(theme);
        let body_class = themed_body_class(&sink.body_class(), &written.body_classes, &classes);
        sink.set_body_class(&body_class);
        written.body_classes = classes;

        debug!(
            "Applied branding for tenant {} ({} properties)",
            tenant.id,
            properties.len()
        );
        previous
    }

    /// Roll the sink back to a snapshot returned by [`apply_tenant`](Self::apply_tenant)
    pub fn restore(&self, snapshot: &DocumentSnapshot) {
        let mut written = self.written.lock();
        let mut sink = self.sink.write();
        sink.restore(snapshot);

        written
            .properties
            .retain(|name| snapshot.properties.contains_key(name));
        let restored: BTreeSet<&str> = snapshot.body_class.split_whitespace().collect();
        written
            .body_classes
            .retain(|class| restored.contains(class.as_str()));
    }
}

impl<S: ThemeSink> BrandingApplier for BrandingApplicator<S> {
    fn apply(&self, tenant: &TenantConfig) {
        self.apply_tenant(tenant);
    }
}

fn theme_classes(theme: &ThemeConfig) -> Vec<String> {
    vec![format!("theme-{}", theme.name), format!("{}-mode", theme.mode)]
}

/// Swap the classes a previous application wrote for `next`, keeping every other class
fn themed_body_class(current: &str, previous: &[String], next: &[String]) -> String {
    let mut classes: Vec<&str> = current
        .split_whitespace()
        .filter(|class| !previous.iter().chain(next).any(|owned| owned.as_str() == *class))
        .collect();
    classes.extend(next.iter().map(String::as_str));
    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Document;
    use lms_admin_core::{Branding, TenantSettings, ThemeMode};
    use pretty_assertions::assert_eq;

    fn tenant() -> TenantConfig {
        let mut theme = ThemeConfig {
            name: "ocean".to_string(),
            mode: ThemeMode::Dark,
            ..ThemeConfig::default()
        };
        theme.colors.insert("primary".to_string(), "oklch(0.6 0.2 250)".to_string());
        theme.colors.insert("sidebar_primary".to_string(), "#0066cc".to_string());
        theme.border_radius.insert("default".to_string(), "4px".to_string());
        theme.border_radius.insert("sm".to_string(), "2px".to_string());

        TenantConfig {
            id: "t-1".to_string(),
            name: "Acme".to_string(),
            domain: "acme".to_string(),
            settings: TenantSettings {
                branding: Branding {
                    primary_color: Some("#0066cc".to_string()),
                    secondary_color: Some("#ff9900".to_string()),
                    company_name: Some("Acme University".to_string()),
                    favicon_url: Some("https://cdn.example.com/acme.ico".to_string()),
                    ..Branding::default()
                },
                theme_config: Some(theme),
                ..TenantSettings::default()
            },
            ..TenantConfig::default()
        }
    }

    fn applicator() -> BrandingApplicator<Document> {
        BrandingApplicator::new(Arc::new(RwLock::new(Document::new())))
    }

    #[test]
    fn test_apply_writes_document() {
        let applicator = applicator();
        applicator.apply_tenant(&tenant());

        let sink = applicator.sink();
        let doc = sink.read();
        assert_eq!(doc.property("--radius"), Some("4px"));
        assert_eq!(doc.property("--radius-sm"), Some("2px"));
        assert_eq!(doc.property("--primary"), Some("oklch(0.6 0.2 250)"));
        assert_eq!(doc.property("--sidebar-primary"), Some("#0066cc"));
        assert_eq!(doc.property("--primary-color"), Some("#0066cc"));
        assert_eq!(doc.property("--secondary-color"), Some("#ff9900"));
        assert_eq!(doc.root_attribute("data-theme"), Some("dark"));
        assert_eq!(doc.title(), "Acme University - LMS");
        assert_eq!(doc.favicon(), Some("https://cdn.example.com/acme.ico"));
        assert_eq!(doc.class_list(), vec!["theme-ocean", "dark-mode"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let applicator = applicator();
        applicator.apply_tenant(&tenant());
        let once = applicator.sink().read().clone();

        applicator.apply_tenant(&tenant());
        let twice = applicator.sink().read().clone();

        assert_eq!(once, twice);
        assert_eq!(twice.head_links().len(), 1);
    }

    #[test]
    fn test_foreign_body_classes_survive() {
        let applicator = applicator();
        applicator
            .sink()
            .write()
            .set_body_class("modal-open edit-mode theme-switcher-open");

        applicator.apply_tenant(&tenant());
        assert_eq!(
            applicator.sink().read().class_list(),
            vec!["modal-open", "edit-mode", "theme-switcher-open", "theme-ocean", "dark-mode"]
        );

        let mut light = tenant();
        if let Some(theme) = light.settings.theme_config.as_mut() {
            theme.name = "sand".to_string();
            theme.mode = ThemeMode::Light;
        }
        applicator.apply_tenant(&light);
        assert_eq!(
            applicator.sink().read().class_list(),
            vec!["modal-open", "edit-mode", "theme-switcher-open", "theme-sand", "light-mode"]
        );
    }

    #[test]
    fn test_switching_to_tenant_without_favicon_restores_page_icon() {
        let applicator = applicator();
        applicator.sink().write().upsert_favicon("/favicon.ico");

        applicator.apply_tenant(&tenant());
        assert_eq!(
            applicator.sink().read().favicon(),
            Some("https://cdn.example.com/acme.ico")
        );

        let mut plain = tenant();
        plain.settings.branding.favicon_url = None;
        applicator.apply_tenant(&plain);
        assert_eq!(applicator.sink().read().favicon(), Some("/favicon.ico"));
    }

    #[test]
    fn test_tenant_favicon_removed_when_page_had_none() {
        let applicator = applicator();
        applicator.apply_tenant(&tenant());

        let mut plain = tenant();
        plain.settings.branding.favicon_url = None;
        applicator.apply_tenant(&plain);

        let sink = applicator.sink();
        let doc = sink.read();
        assert!(doc.favicon().is_none());
        assert!(doc.head_links().is_empty());
    }

    #[test]
    fn test_switching_tenant_removes_stale_tokens() {
        let applicator = applicator();
        applicator
            .sink()
            .write()
            .set_property("--app-header-height", "48px");
        applicator.apply_tenant(&tenant());

        let mut other = tenant();
        other.settings.theme_config = None;
        other.settings.branding = Branding::default();
        applicator.apply_tenant(&other);

        let sink = applicator.sink();
        let doc = sink.read();
        assert_eq!(doc.property("--radius"), None);
        assert_eq!(doc.property("--primary-color"), None);
        assert_eq!(doc.property("--app-header-height"), Some("48px"));
        assert_eq!(doc.title(), "Acme - LMS");
        assert_eq!(doc.root_attribute("data-theme"), Some("light"));
        assert_eq!(doc.class_list(), vec!["theme-default", "light-mode"]);
    }

    #[test]
    fn test_restore_previous_snapshot() {
        let applicator = applicator();
        applicator.sink().write().set_title("Admin");

        let previous = applicator.apply_tenant(&tenant());
        assert_eq!(previous.title, "Admin");

        applicator.restore(&previous);
        let doc = applicator.sink().read().clone();
        assert_eq!(doc.snapshot(), previous);
        assert!(doc.properties().is_empty());
    }

    #[test]
    fn test_applies_through_core_trait() {
        let applicator: Arc<dyn BrandingApplier> = Arc::new(applicator());
        applicator.apply(&tenant());
    }
}
