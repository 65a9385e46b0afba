//! Schema versioning using `PRAGMA user_version`.
//!
//! Each version bump is a const SQL string applied in order.

use rusqlite::Connection;
use tracing::info;
use veritas_core::errors::{StorageError, StorageResult};

use crate::schema::SCHEMA_V1;

/// Current schema version. Bump this when adding new migrations.
pub const CURRENT_VERSION: u32 = 1;

pub fn get_schema_version(conn: &Connection) -> StorageResult<u32> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: u32) -> StorageResult<()> {
    conn.pragma_update(None, "user_version", version)?;
    Ok(())
}

/// Bring the database up to [`CURRENT_VERSION`]. Returns the resulting version.
pub fn migrate(conn: &Connection) -> StorageResult<u32> {
    let current = get_schema_version(conn)?;

    if current > CURRENT_VERSION {
        return Err(StorageError::MigrationFailed {
            version: current,
            message: format!(
                "database schema is newer than this build supports ({CURRENT_VERSION})"
            ),
        });
    }
    if current == CURRENT_VERSION {
        return Ok(current);
    }

    if current < 1 {
        info!("Migrating schema: 0 → 1 (users, history)");
        conn.execute_batch(SCHEMA_V1)
            .map_err(|e| StorageError::MigrationFailed {
                version: 1,
                message: e.to_string(),
            })?;
        set_schema_version(conn, 1)?;
    }

    let final_version = get_schema_version(conn)?;
    info!(from = current, to = final_version, "Schema migration complete");
    Ok(final_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::pragmas::configure_connection(&conn).unwrap();
        conn
    }

    #[test]
    fn fresh_db_version_is_zero() {
        let conn = fresh_db();
        assert_eq!(get_schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn migrate_creates_tables() {
        let conn = fresh_db();
        assert_eq!(migrate(&conn).unwrap(), 1);

        for table in crate::schema::TABLE_NAMES {
            let exists: bool = conn
                .query_row(
                    "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert!(exists, "missing table {table}");
        }
    }

    #[test]
    fn migrate_idempotent() {
        let conn = fresh_db();
        let v1 = migrate(&conn).unwrap();
        let v2 = migrate(&conn).unwrap();
        assert_eq!(v1, v2);
    }

    #[test]
    fn newer_schema_is_refused() {
        let conn = fresh_db();
        set_schema_version(&conn, CURRENT_VERSION + 1).unwrap();
        assert!(matches!(
            migrate(&conn),
            Err(StorageError::MigrationFailed { .. })
        ));
    }
}
