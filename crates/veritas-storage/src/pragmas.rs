//! Per-connection SQLite settings, applied right after a connection opens.

use rusqlite::Connection;
use veritas_core::errors::StorageResult;

/// Writer settings. WAL lets the read pool keep serving history lists while
/// an upload is being recorded; `foreign_keys` is what makes removing an
/// account take its history rows with it.
pub fn configure_connection(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        ",
    )?;
    Ok(())
}

/// Reader settings: no journal change (readers cannot set it), writes refused.
pub fn configure_readonly_connection(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "
        PRAGMA busy_timeout = 5000;
        PRAGMA query_only = ON;
        ",
    )?;
    Ok(())
}
