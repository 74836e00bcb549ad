//! Tenant configuration types

use crate::error::{Result, ThemeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Ordered token map (token name -> CSS value)
pub type TokenMap = BTreeMap<String, String>;

/// One tenant's identity and presentation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: String,
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub settings: TenantSettings,
    /// Server fields this client does not model, written back unchanged on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TenantConfig {
    /// Name shown in the document title
    pub fn display_name(&self) -> &str {
        self.settings
            .branding
            .company_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    /// Theme configuration, if the tenant has a structured theme
    pub fn theme(&self) -> Option<&ThemeConfig> {
        self.settings.theme_config.as_ref()
    }
}

/// Tenant settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantSettings {
    #[serde(default)]
    pub branding: Branding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_config: Option<ThemeConfig>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub features: BTreeMap<String, bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Legacy branding fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Theme mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    Auto,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_theme_name() -> String {
    "default".to_string()
}

/// Structured theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name, used for the `theme-{name}` body class
    #[serde(default = "default_theme_name")]
    pub name: String,
    #[serde(default)]
    pub mode: ThemeMode,
    #[serde(default)]
    pub colors: TokenMap,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub border_radius: TokenMap,
    #[serde(default)]
    pub shadows: TokenMap,
    #[serde(default)]
    pub spacing: TokenMap,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            mode: ThemeMode::default(),
            colors: TokenMap::new(),
            typography: Typography::default(),
            border_radius: TokenMap::new(),
            shadows: TokenMap::new(),
            spacing: TokenMap::new(),
        }
    }
}

/// Typography scales
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    #[serde(default)]
    pub font_family: TokenMap,
    #[serde(default)]
    pub font_sizes: TokenMap,
    #[serde(default)]
    pub font_weights: TokenMap,
    #[serde(default)]
    pub line_heights: TokenMap,
}

impl ThemeConfig {
    /// Every scale, paired with its category name
    pub fn scales(&self) -> [(&'static str, &TokenMap); 8] {
        [
            ("colors", &self.colors),
            ("font_family", &self.typography.font_family),
            ("font_sizes", &self.typography.font_sizes),
            ("font_weights", &self.typography.font_weights),
            ("line_heights", &self.typography.line_heights),
            ("border_radius", &self.border_radius),
            ("shadows", &self.shadows),
            ("spacing", &self.spacing),
        ]
    }

    /// Reject scales with empty tokens
    pub fn validate(&self) -> Result<()> {
        for (category, scale) in self.scales() {
            if let Some((key, _)) = scale.iter().find(|(_, value)| value.trim().is_empty()) {
                return Err(ThemeError::EmptyToken {
                    category,
                    key: key.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// How the active tenant was determined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionMethod {
    #[serde(rename = "subdomain")]
    Subdomain,
    #[serde(rename = "path")]
    Path,
    /// `?tenant=` query parameter; the persisted tag is `header`
    #[serde(rename = "header")]
    Query,
    #[serde(rename = "localStorage")]
    Cache,
    #[default]
    #[serde(rename = "default")]
    Default,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMethod::Subdomain => "subdomain",
            DetectionMethod::Path => "path",
            DetectionMethod::Query => "header",
            DetectionMethod::Cache => "localStorage",
            DetectionMethod::Default => "default",
        }
    }
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
