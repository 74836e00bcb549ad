//! Palette generation from a single seed color
//!
//! The seed is copied into the brand slots and every other slot takes a fixed neutral token,
//! for both the light and the dark variant. No lightness or hue scale is derived.

use crate::error::{PaletteError, Result};
use crate::types::{ColorPalette, TokenMap};
use once_cell::sync::Lazy;
use regex::Regex;

/// Slots that receive the seed color verbatim
pub const SEED_SLOTS: [&str; 5] = ["primary", "accent", "ring", "sidebar_primary", "sidebar_ring"];

const NEUTRAL_LIGHT: &[(&str, &str)] = &[
    ("background", "oklch(1 0 0)"),
    ("foreground", "oklch(0.145 0 0)"),
    ("card", "oklch(1 0 0)"),
    ("card_foreground", "oklch(0.145 0 0)"),
    ("popover", "oklch(1 0 0)"),
    ("popover_foreground", "oklch(0.145 0 0)"),
    ("primary_foreground", "oklch(0.985 0 0)"),
    ("secondary", "oklch(0.97 0 0)"),
    ("secondary_foreground", "oklch(0.205 0 0)"),
    ("muted", "oklch(0.97 0 0)"),
    ("muted_foreground", "oklch(0.556 0 0)"),
    ("accent_foreground", "oklch(0.205 0 0)"),
    ("destructive", "oklch(0.577 0.245 27.325)"),
    ("border", "oklch(0.922 0 0)"),
    ("input", "oklch(0.922 0 0)"),
    ("sidebar", "oklch(0.985 0 0)"),
    ("sidebar_foreground", "oklch(0.145 0 0)"),
    ("sidebar_primary_foreground", "oklch(0.985 0 0)"),
    ("sidebar_accent", "oklch(0.97 0 0)"),
    ("sidebar_accent_foreground", "oklch(0.205 0 0)"),
    ("sidebar_border", "oklch(0.922 0 0)"),
];

const NEUTRAL_DARK: &[(&str, &str)] = &[
    ("background", "oklch(0.145 0 0)"),
    ("foreground", "oklch(0.985 0 0)"),
    ("card", "oklch(0.205 0 0)"),
    ("card_foreground", "oklch(0.985 0 0)"),
    ("popover", "oklch(0.205 0 0)"),
    ("popover_foreground", "oklch(0.985 0 0)"),
    ("primary_foreground", "oklch(0.205 0 0)"),
    ("secondary", "oklch(0.269 0 0)"),
    ("secondary_foreground", "oklch(0.985 0 0)"),
    ("muted", "oklch(0.269 0 0)"),
    ("muted_foreground", "oklch(0.708 0 0)"),
    ("accent_foreground", "oklch(0.985 0 0)"),
    ("destructive", "oklch(0.704 0.191 22.216)"),
    ("border", "oklch(1 0 0 / 10%)"),
    ("input", "oklch(1 0 0 / 15%)"),
    ("sidebar", "oklch(0.205 0 0)"),
    ("sidebar_foreground", "oklch(0.985 0 0)"),
    ("sidebar_primary_foreground", "oklch(0.985 0 0)"),
    ("sidebar_accent", "oklch(0.269 0 0)"),
    ("sidebar_accent_foreground", "oklch(0.985 0 0)"),
    ("sidebar_border", "oklch(1 0 0 / 10%)"),
];

static COLOR_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(#([0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})|(oklch|oklab|rgb|rgba|hsl|hsla)\([^()]+\))$")
        .expect("color token pattern is valid")
});

/// Whether `value` looks like a CSS color token this client can pass through
pub fn is_color_token(value: &str) -> bool {
    COLOR_TOKEN.is_match(value.trim())
}

fn variant(neutrals: &[(&str, &str)], seed: &str) -> TokenMap {
    let mut colors: TokenMap = neutrals
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    for slot in SEED_SLOTS {
        colors.insert(slot.to_string(), seed.to_string());
    }
    colors
}

/// Build a fresh palette from one seed color
pub fn generate_from_seed(seed: &str) -> Result<ColorPalette> {
    let seed = seed.trim();
    if !is_color_token(seed) {
        return Err(PaletteError::InvalidSeedColor(seed.to_string()).into());
    }

    Ok(ColorPalette {
        id: format!("generated-{}", uuid::Uuid::new_v4()),
        name: format!("Custom {}", seed),
        description: Some(format!("Generated from {}", seed)),
        colors: variant(NEUTRAL_LIGHT, seed),
        dark_mode_colors: variant(NEUTRAL_DARK, seed),
        preview: format!("linear-gradient(135deg, {} 0%, oklch(0.97 0 0) 100%)", seed),
    })
}
