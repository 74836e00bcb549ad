//! CSS custom property naming

use lms_admin_core::{TenantConfig, ThemeConfig};
use std::collections::BTreeMap;
use tracing::warn;

/// Legacy branding properties
pub const PRIMARY_COLOR_PROPERTY: &str = "--primary-color";
pub const SECONDARY_COLOR_PROPERTY: &str = "--secondary-color";

/// Property prefix for each theme scale
pub fn scale_prefix(category: &str) -> &'static str {
    match category {
        "font_family" | "font_weights" => "--font-",
        "font_sizes" => "--text-",
        "line_heights" => "--leading-",
        "border_radius" => "--radius-",
        "shadows" => "--shadow-",
        "spacing" => "--spacing-",
        _ => "--",
    }
}

/// Property name for `key` under `prefix`.
///
/// Underscores become hyphens; the key `default` collapses to the bare prefixed name
/// (`--radius-` + `default` -> `--radius`).
pub fn css_variable_name(prefix: &str, key: &str) -> String {
    if key == "default" && prefix != "--" {
        return prefix.trim_end_matches('-').to_string();
    }
    format!("{}{}", prefix, key.replace('_', "-"))
}

/// Custom properties for every token of a theme. Empty tokens are skipped.
pub fn theme_properties(theme: &ThemeConfig) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    for (category, scale) in theme.scales() {
        let prefix = scale_prefix(category);
        for (key, value) in scale {
            if value.trim().is_empty() {
                warn!("Skipping empty theme token {}.{}", category, key);
                continue;
            }
            properties.insert(css_variable_name(prefix, key), value.clone());
        }
    }
    properties
}

/// All custom properties a tenant's branding sets
pub fn branding_properties(tenant: &TenantConfig) -> BTreeMap<String, String> {
    let branding = &tenant.settings.branding;
    let mut properties = tenant.theme().map(theme_properties).unwrap_or_default();

    let legacy = [
        (PRIMARY_COLOR_PROPERTY, &branding.primary_color),
        (SECONDARY_COLOR_PROPERTY, &branding.secondary_color),
    ];
    for (name, value) in legacy {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            properties.insert(name.to_string(), value.to_string());
        }
    }

    properties
}
