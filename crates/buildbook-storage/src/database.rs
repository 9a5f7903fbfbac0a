//! Database connection and key-value operations

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::StorageError;
use crate::migrations::run_migrations;
use crate::Result;

/// Same budget browsers give an origin's local storage.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    quota_bytes: u64,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P, quota_bytes: u64) -> Result<Self> {
        let conn = Connection::open(path)?;

        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        Self::from_connection(conn, quota_bytes)
    }

    pub fn open_in_memory(quota_bytes: u64) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, quota_bytes)
    }

    fn from_connection(conn: Connection, quota_bytes: u64) -> Result<Self> {
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            quota_bytes,
        })
    }

    pub fn quota_bytes(&self) -> u64 {
        self.quota_bytes
    }

    pub(crate) fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        f(&self.conn.lock())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.put_all(&[(key, value)])
    }

    /// Stores every pair in one transaction.
    ///
    /// Fails with [`StorageError::QuotaExceeded`] when the total payload
    /// after the write would exceed the quota. On failure nothing is
    /// written and every previous value is kept.
    pub fn put_all(&self, entries: &[(&str, &str)]) -> Result<()> {
        let Some((first_key, _)) = entries.first() else {
            return Ok(());
        };
        let updated_at = Utc::now().to_rfc3339();
        let quota = self.quota_bytes;

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        let mut stored = 0u64;
        for (key, _) in entries {
            let size: Option<i64> = tx
                .query_row(
                    "SELECT LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))
                     FROM kv_store WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            stored += size.unwrap_or(0).max(0) as u64;
        }

        let incoming: u64 = entries
            .iter()
            .map(|(key, value)| (key.len() + value.len()) as u64)
            .sum();
        let needed = total_usage(&tx)?.saturating_sub(stored) + incoming;
        if needed > quota {
            return Err(StorageError::QuotaExceeded {
                key: first_key.to_string(),
                needed,
                quota,
            });
        }

        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
            Ok(())
        })
    }

    /// Bytes currently stored, counted as key plus value.
    pub fn usage_bytes(&self) -> Result<u64> {
        self.with_connection(total_usage)
    }
}

fn total_usage(conn: &Connection) -> Result<u64> {
    let used: i64 = conn.query_row(
        "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0)
         FROM kv_store",
        [],
        |row| row.get(0),
    )?;
    Ok(used.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let db = Database::open_in_memory(DEFAULT_QUOTA_BYTES).unwrap();
        assert_eq!(db.get("a").unwrap(), None);

        db.put("a", "[1]").unwrap();
        db.put("a", "[1,2]").unwrap();
        assert_eq!(db.get("a").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(db.usage_bytes().unwrap(), 1 + 5);

        db.remove("a").unwrap();
        db.remove("a").unwrap();
        assert_eq!(db.get("a").unwrap(), None);
    }

    #[test]
    fn test_quota_rejects_oversized_write_and_keeps_old_value() {
        let db = Database::open_in_memory(32).unwrap();
        db.put("k", "small").unwrap();

        let err = db.put("k", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 32, .. }));
        assert_eq!(db.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_quota_counts_other_keys() {
        let db = Database::open_in_memory(20).unwrap();
        db.put("a", "0123456789").unwrap();
        assert!(db.put("b", "0123456789").is_err());
        // Replacing a key only counts its new size.
        db.put("a", "012345678901234567").unwrap();
    }

    #[test]
    fn test_put_all_is_all_or_nothing() {
        let db = Database::open_in_memory(20).unwrap();
        db.put("a", "old").unwrap();

        let err = db.put_all(&[("a", "0123456789"), ("b", "0123456789")]).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { needed: 22, .. }));
        assert_eq!(db.get("a").unwrap().as_deref(), Some("old"));
        assert_eq!(db.get("b").unwrap(), None);

        db.put_all(&[("a", "0123456789"), ("b", "01234567")]).unwrap();
        assert_eq!(db.usage_bytes().unwrap(), 20);
    }

    #[test]
    fn test_clones_share_connection() {
        let db = Database::open_in_memory(DEFAULT_QUOTA_BYTES).unwrap();
        let other = db.clone();
        db.put("shared", "1").unwrap();
        assert_eq!(other.get("shared").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_open_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildbook.db");

        {
            let db = Database::open(&path, DEFAULT_QUOTA_BYTES).unwrap();
            db.put("persisted", "yes").unwrap();
        }
        let reopened = Database::open(&path, DEFAULT_QUOTA_BYTES).unwrap();
        assert_eq!(reopened.get("persisted").unwrap().as_deref(), Some("yes"));
    }
}
