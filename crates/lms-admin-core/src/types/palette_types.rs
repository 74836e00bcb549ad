//! Color palette types

use super::TokenMap;
use serde::{Deserialize, Serialize};

/// A named set of light and dark color tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub colors: TokenMap,
    #[serde(default)]
    pub dark_mode_colors: TokenMap,
    /// Decorative CSS gradient for palette pickers
    #[serde(default)]
    pub preview: String,
}

/// The color block of one tenant's theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantColors {
    #[serde(default)]
    pub colors: TokenMap,
    #[serde(default)]
    pub dark_mode_colors: TokenMap,
}

/// A saved, named preset of tenant colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreset {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub colors: TokenMap,
    #[serde(default)]
    pub dark_mode_colors: TokenMap,
}
