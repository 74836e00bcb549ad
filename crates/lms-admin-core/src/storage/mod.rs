//! SQLite-based client-side persistent storage
//!
//! This module provides:
//! - Database initialization and migrations
//! - A string key/value store (the client's equivalent of browser local storage)
//! - Connection pooling

mod migrations;
mod queries;

pub use migrations::run_migrations;
pub use queries::*;

use crate::error::{Error, Result, StorageError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Database connection pool type
pub type DbPool = Pool<SqliteConnectionManager>;

/// Storage manager for persisted client state
pub struct Storage {
    pool: DbPool,
    db_path: PathBuf,
}

impl Storage {
    /// Create a new storage instance with a directory path
    pub fn new_with_path(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();

        std::fs::create_dir_all(data_dir).map_err(|e| {
            Error::Storage(StorageError::Database(format!(
                "Failed to create data directory: {}",
                e
            )))
        })?;

        let db_path = data_dir.join("lms-admin.db");
        info!("Database path: {:?}", db_path);

        Self::from_path(db_path)
    }

    /// Create storage from a specific path
    pub fn from_path(db_path: PathBuf) -> Result<Self> {
        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| Error::Storage(StorageError::Pool(e.to_string())))?;

        let storage = Self { pool, db_path };
        storage.initialize()?;

        Ok(storage)
    }

    /// Create in-memory storage (for testing)
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| Error::Storage(StorageError::Pool(e.to_string())))?;

        let storage = Self {
            pool,
            db_path: PathBuf::from(":memory:"),
        };

        storage.initialize()?;

        Ok(storage)
    }

    fn initialize(&self) -> Result<()> {
        let conn = self.pool.get()?;
        run_migrations(&conn)?;
        info!("Database initialized successfully");
        Ok(())
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| Error::Storage(StorageError::Pool(e.to_string())))
    }

    /// Get the database path
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    /// Read a raw value
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connection()?;
        get_item(&conn, key)
    }

    /// Write a raw value, replacing any previous one
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connection()?;
        set_item(&conn, key, value)
    }

    /// Delete a value; missing keys are not an error
    pub fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.connection()?;
        remove_item(&conn, key)
    }

    /// Serialize a value as JSON under `key`
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        debug!("Persisting {} ({} bytes)", key, json.len());
        self.set_item(key, &json)
    }

    /// Read a JSON value. Malformed entries are returned as errors, not deleted.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_in_memory_storage() {
        let storage = Storage::in_memory().unwrap();
        assert!(storage.connection().is_ok());
    }

    #[test]
    fn test_json_helpers() {
        let storage = Storage::in_memory().unwrap();
        storage.set_json("numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Option<Vec<i32>> = storage.get_json("numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let missing: Option<Vec<i32>> = storage.get_json("missing").unwrap();
        assert!(missing.is_none());

        storage.set_item("broken", "{not json").unwrap();
        assert!(storage.get_json::<Vec<i32>>("broken").is_err());
    }

    #[test]
    fn test_on_disk_storage_survives_reopen() {
        let dir = tempdir().unwrap();

        {
            let storage = Storage::new_with_path(dir.path()).unwrap();
            storage.set_item("auth_token", "abc").unwrap();
        }

        let storage = Storage::new_with_path(dir.path()).unwrap();
        assert_eq!(storage.get_item("auth_token").unwrap(), Some("abc".to_string()));
        assert!(storage.db_path().ends_with("lms-admin.db"));
    }
}
