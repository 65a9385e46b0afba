//! StorageEngine: concrete `IVeritasStorage` implementation wrapping `ConnectionPool`.
//!
//! Each trait method delegates to the free functions in `queries/`, routed
//! through the pool: writes on the writer, reads on a reader.

use std::path::Path;

use tracing::{debug, info};
use veritas_core::errors::{StorageError, StorageResult};
use veritas_core::traits::storage::StorageHealth;
use veritas_core::types::history::{HistoryEntry, NewHistoryEntry, timestamp_now};
use veritas_core::types::user::{User, UserId};
use veritas_core::IVeritasStorage;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{history, users};

/// SQLite-backed row store for accounts and detection history.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine, creating the parent directory if needed.
    pub fn open(path: &Path, read_pool_size: usize) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Open {
                path: path.display().to_string(),
                message: format!("failed to create database directory: {e}"),
            })?;
        }
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let engine = Self { pool };
        engine.initialize()?;
        info!(path = %path.display(), readers = engine.pool.reader_count(), "Storage opened");
        Ok(engine)
    }

    /// Open an in-memory engine (for tests).
    pub fn open_in_memory() -> StorageResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Execute a closure with the writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> StorageResult<T>,
    {
        self.pool.with_writer(f)
    }

    /// Execute a closure with a reader connection.
    pub fn with_reader<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> StorageResult<T>,
    {
        self.pool.with_reader(f)
    }
}

impl IVeritasStorage for StorageEngine {
    fn create_user(&self, username: &str, token_hash: &str) -> StorageResult<User> {
        let created_at = timestamp_now();
        let user = self
            .pool
            .with_writer(|conn| users::insert_user(conn, username, token_hash, &created_at))
            .map_err(|e| match e {
                StorageError::DuplicateKey(_) => {
                    StorageError::DuplicateKey(format!("username already taken: {username}"))
                }
                other => other,
            })?;
        info!(user_id = user.id, username, "User created");
        Ok(user)
    }

    fn get_user(&self, id: UserId) -> StorageResult<Option<User>> {
        self.pool.with_reader(|conn| users::get_user(conn, id))
    }

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        self.pool
            .with_reader(|conn| users::get_user_by_username(conn, username))
    }

    fn find_user_by_token_hash(&self, token_hash: &str) -> StorageResult<Option<User>> {
        self.pool
            .with_reader(|conn| users::find_by_token_hash(conn, token_hash))
    }

    fn set_token_hash(&self, id: UserId, token_hash: &str) -> StorageResult<bool> {
        let updated = self
            .pool
            .with_writer(|conn| users::update_token_hash(conn, id, token_hash))?;
        if updated {
            info!(user_id = id, "Token rotated");
        }
        Ok(updated)
    }

    fn list_users(&self) -> StorageResult<Vec<User>> {
        self.pool.with_reader(users::list_users)
    }

    fn delete_user(&self, id: UserId) -> StorageResult<bool> {
        let deleted = self.pool.with_writer(|conn| users::delete_user(conn, id))?;
        if deleted {
            info!(user_id = id, "User deleted with history");
        }
        Ok(deleted)
    }

    fn insert_history(&self, entry: &NewHistoryEntry) -> StorageResult<i64> {
        let id = self
            .pool
            .with_writer(|conn| history::insert_entry(conn, entry))?;
        debug!(user_id = entry.user_id, entry_id = id, kind = %entry.kind, "History entry stored");
        Ok(id)
    }

    fn list_history(&self, user_id: UserId) -> StorageResult<Vec<HistoryEntry>> {
        self.pool
            .with_reader(|conn| history::list_entries(conn, user_id))
    }

    fn get_history(&self, user_id: UserId, entry_id: i64) -> StorageResult<Option<HistoryEntry>> {
        self.pool
            .with_reader(|conn| history::get_entry(conn, user_id, entry_id))
    }

    fn delete_history(&self, user_id: UserId, entry_id: i64) -> StorageResult<bool> {
        self.pool
            .with_writer(|conn| history::delete_entry(conn, user_id, entry_id))
    }

    fn clear_history(&self, user_id: UserId) -> StorageResult<usize> {
        let removed = self
            .pool
            .with_writer(|conn| history::clear_entries(conn, user_id))?;
        debug!(user_id, removed, "History cleared");
        Ok(removed)
    }

    fn initialize(&self) -> StorageResult<()> {
        self.pool.with_writer(|conn| migrations::migrate(conn).map(|_| ()))
    }

    fn health_check(&self) -> StorageResult<StorageHealth> {
        let schema_version = self.pool.with_reader(migrations::get_schema_version)?;
        Ok(StorageHealth {
            connected: true,
            wal_mode: self.pool.is_wal_mode(),
            schema_version,
        })
    }
}
