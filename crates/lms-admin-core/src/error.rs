//! Error types for the LMS admin core

use thiserror::Error;

/// Main error type for LMS admin operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tenant error: {0}")]
    Tenant(#[from] TenantError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Tenant resolution and loading errors
#[derive(Error, Debug)]
pub enum TenantError {
    #[error("No tenant could be resolved from the current location")]
    NotResolved,

    #[error("Tenant not found for domain: {0}")]
    NotFound(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Failed to save tenant {id}: {reason}")]
    SaveFailed { id: String, reason: String },

    #[error("Tenant request superseded by a newer request")]
    Superseded,
}

/// Color palette service errors
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Authentication token missing, please sign in again")]
    MissingAuthToken,

    #[error("Tenant context missing, cannot call palette API without a tenant")]
    MissingTenantContext,

    #[error("Invalid seed color: {0:?}")]
    InvalidSeedColor(String),

    #[error("Palette request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Unexpected palette response: {0}")]
    InvalidResponse(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Connection pool error: {0}")]
    Pool(String),
}

/// Theme configuration errors
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Empty token for {category}.{key}")]
    EmptyToken { category: &'static str, key: String },
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<r2d2::Error> for Error {
    fn from(err: r2d2::Error) -> Self {
        Error::Storage(StorageError::Pool(err.to_string()))
    }
}

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
