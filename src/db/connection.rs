use rusqlite::Connection;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Browser local storage gives an origin roughly 5 MiB.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Handle to the SQLite file that backs the key-value store.
pub struct Database {
    path: Option<PathBuf>,
    conn: RefCell<Connection>,
    quota_bytes: usize,
}

impl Database {
    pub fn open(path: impl AsRef<Path>, quota_bytes: usize) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .map_err(|e| StoreError::Db(format!("Open DB failed: {e}")))?;
        Ok(Self {
            path: Some(path),
            conn: RefCell::new(conn),
            quota_bytes,
        })
    }

    pub fn open_in_memory(quota_bytes: usize) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Db(format!("Open DB failed: {e}")))?;
        Ok(Self {
            path: None,
            conn: RefCell::new(conn),
            quota_bytes,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn quota_bytes(&self) -> usize {
        self.quota_bytes
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut conn = self.conn.borrow_mut();
        f(&mut conn)
    }
}

/// Apply the embedded schema. Safe to run on every start.
pub fn init_db(db: &Database) -> Result<(), StoreError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| StoreError::Db(format!("Failed to apply schema: {e}")))?;
        Ok(())
    })?;

    tracing::debug!(path = ?db.path(), "database initialized");
    Ok(())
}
