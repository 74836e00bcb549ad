//! Key/value queries

use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Get a stored value
pub fn get_item(conn: &Connection, key: &str) -> Result<Option<String>> {
    let result = conn
        .query_row(
            "SELECT value FROM local_storage WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()?;

    Ok(result)
}

/// Set a stored value
pub fn set_item(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO local_storage (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
        "#,
        params![key, value],
    )?;

    Ok(())
}

/// Remove a stored value
pub fn remove_item(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM local_storage WHERE key = ?", params![key])?;
    Ok(())
}
