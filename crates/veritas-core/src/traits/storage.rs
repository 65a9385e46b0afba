//! `IVeritasStorage`: the contract between request handling and the row store.
//!
//! The SQLite implementation lives in `veritas-storage`. The trait is
//! object-safe, `Send + Sync`, and has a blanket `Arc<T>` impl. Every history
//! operation is scoped by owner: a user can never see or delete another
//! user's rows.

use std::sync::Arc;

use crate::errors::StorageResult;
use crate::types::history::{HistoryEntry, NewHistoryEntry};
use crate::types::user::{User, UserId};

/// Health status of the row store.
#[derive(Debug, Clone)]
pub struct StorageHealth {
    pub connected: bool,
    pub wal_mode: bool,
    pub schema_version: u32,
}

pub trait IVeritasStorage: Send + Sync {
    // ── Users ──

    /// Create an account holding the hash of its API token.
    /// Fails with `DuplicateKey` if the username is taken.
    fn create_user(&self, username: &str, token_hash: &str) -> StorageResult<User>;

    fn get_user(&self, id: UserId) -> StorageResult<Option<User>>;

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Resolve the account owning a token hash.
    fn find_user_by_token_hash(&self, token_hash: &str) -> StorageResult<Option<User>>;

    /// Replace a user's token hash. Returns `false` if the user does not exist.
    fn set_token_hash(&self, id: UserId, token_hash: &str) -> StorageResult<bool>;

    fn list_users(&self) -> StorageResult<Vec<User>>;

    /// Delete a user and all of their history. Returns `false` if absent.
    fn delete_user(&self, id: UserId) -> StorageResult<bool>;

    // ── History ──

    /// Insert a row, returning its id.
    fn insert_history(&self, entry: &NewHistoryEntry) -> StorageResult<i64>;

    /// All rows owned by `user_id`, oldest first.
    fn list_history(&self, user_id: UserId) -> StorageResult<Vec<HistoryEntry>>;

    fn get_history(&self, user_id: UserId, entry_id: i64) -> StorageResult<Option<HistoryEntry>>;

    /// Returns `false` when no row with that id belongs to `user_id`.
    fn delete_history(&self, user_id: UserId, entry_id: i64) -> StorageResult<bool>;

    /// Returns the number of rows removed.
    fn clear_history(&self, user_id: UserId) -> StorageResult<usize>;

    // ── Lifecycle ──

    /// Create tables and run pending migrations.
    fn initialize(&self) -> StorageResult<()>;

    fn health_check(&self) -> StorageResult<StorageHealth>;
}

// ── Arc<T> blanket impl ──

impl<T: IVeritasStorage + ?Sized> IVeritasStorage for Arc<T> {
    fn create_user(&self, username: &str, token_hash: &str) -> StorageResult<User> {
        (**self).create_user(username, token_hash)
    }

    fn get_user(&self, id: UserId) -> StorageResult<Option<User>> {
        (**self).get_user(id)
    }

    fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        (**self).get_user_by_username(username)
    }

    fn find_user_by_token_hash(&self, token_hash: &str) -> StorageResult<Option<User>> {
        (**self).find_user_by_token_hash(token_hash)
    }

    fn set_token_hash(&self, id: UserId, token_hash: &str) -> StorageResult<bool> {
        (**self).set_token_hash(id, token_hash)
    }

    fn list_users(&self) -> StorageResult<Vec<User>> {
        (**self).list_users()
    }

    fn delete_user(&self, id: UserId) -> StorageResult<bool> {
        (**self).delete_user(id)
    }

    fn insert_history(&self, entry: &NewHistoryEntry) -> StorageResult<i64> {
        (**self).insert_history(entry)
    }

    fn list_history(&self, user_id: UserId) -> StorageResult<Vec<HistoryEntry>> {
        (**self).list_history(user_id)
    }

    fn get_history(&self, user_id: UserId, entry_id: i64) -> StorageResult<Option<HistoryEntry>> {
        (**self).get_history(user_id, entry_id)
    }

    fn delete_history(&self, user_id: UserId, entry_id: i64) -> StorageResult<bool> {
        (**self).delete_history(user_id, entry_id)
    }

    fn clear_history(&self, user_id: UserId) -> StorageResult<usize> {
        (**self).clear_history(user_id)
    }

    fn initialize(&self) -> StorageResult<()> {
        (**self).initialize()
    }

    fn health_check(&self) -> StorageResult<StorageHealth> {
        (**self).health_check()
    }
}
