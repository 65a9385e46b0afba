//! Storage-layer errors for SQLite operations.

use super::error_code::{self, VeritasErrorCode};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database busy (another operation in progress)")]
    DbBusy,

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Connection lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Failed to open database at {path}: {message}")]
    Open { path: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, msg) => match err.code {
                rusqlite::ffi::ErrorCode::DatabaseBusy | rusqlite::ffi::ErrorCode::DatabaseLocked => {
                    Self::DbBusy
                }
                rusqlite::ffi::ErrorCode::ConstraintViolation
                    if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
                {
                    Self::DuplicateKey(
                        msg.clone().unwrap_or_else(|| "constraint violation".to_string()),
                    )
                }
                _ => Self::SqliteError {
                    message: e.to_string(),
                },
            },
            _ => Self::SqliteError {
                message: e.to_string(),
            },
        }
    }
}

impl VeritasErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::DuplicateKey(_) => error_code::DUPLICATE_KEY,
            Self::NotFound(_) => error_code::NOT_FOUND,
            _ => error_code::STORAGE_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_violation_maps_to_duplicate_key() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err = conn.execute("INSERT INTO t VALUES ('a')", []).unwrap_err();

        let storage: StorageError = err.into();
        assert_eq!(storage.error_code(), error_code::DUPLICATE_KEY);
    }

    #[test]
    fn no_rows_maps_to_generic_sqlite_error() {
        let storage: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert_eq!(storage.error_code(), error_code::STORAGE_ERROR);
    }
}
