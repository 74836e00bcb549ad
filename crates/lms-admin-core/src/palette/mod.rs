//! Color palettes: the REST client and local seed-based generation

mod client;
mod generator;

pub use client::{PaletteClient, AUTH_TOKEN_KEY};
pub use generator::{generate_from_seed, is_color_token, SEED_SLOTS};
