//! SQLite connections for the service database.
//!
//! Account and history writes are serialized on a single writer. Token
//! lookups and history reads rotate over a few read-only connections, so an
//! in-flight detection insert never blocks authentication of other requests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use veritas_core::errors::{StorageError, StorageResult};

use crate::pragmas;

const DEFAULT_READ_POOL_SIZE: usize = 2;

/// One writer plus `N` query-only readers over the same database file.
pub struct ConnectionPool {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    read_index: AtomicUsize,
}

impl ConnectionPool {
    /// Open a file-backed pool. `read_pool_size == 0` selects the default.
    pub fn open(path: &Path, read_pool_size: usize) -> StorageResult<Self> {
        let pool_size = if read_pool_size == 0 {
            DEFAULT_READ_POOL_SIZE
        } else {
            read_pool_size
        };
        let open_err = |e: rusqlite::Error| StorageError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let writer = Connection::open(path).map_err(open_err)?;
        pragmas::configure_connection(&writer)?;

        let mut readers = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let reader = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(open_err)?;
            pragmas::configure_readonly_connection(&reader)?;
            readers.push(Mutex::new(reader));
        }

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            read_index: AtomicUsize::new(0),
        })
    }

    /// Open an in-memory pool. There are no readers: every read goes through
    /// the writer, since separate in-memory connections do not share data.
    pub fn open_in_memory() -> StorageResult<Self> {
        let writer = Connection::open_in_memory().map_err(|e| StorageError::Open {
            path: ":memory:".to_string(),
            message: e.to_string(),
        })?;
        pragmas::configure_connection(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            read_index: AtomicUsize::new(0),
        })
    }

    /// Run `f` on the writer, holding it exclusively for the duration.
    pub fn with_writer<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let conn = self
            .writer
            .lock()
            .map_err(|e| StorageError::LockPoisoned(format!("writer: {e}")))?;
        f(&conn)
    }

    /// Run `f` on the next reader in rotation, or on the writer for an
    /// in-memory pool.
    pub fn with_reader<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }

        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index]
            .lock()
            .map_err(|e| StorageError::LockPoisoned(format!("reader {index}: {e}")))?;
        f(&conn)
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// `false` for in-memory databases, which report `memory`.
    pub fn is_wal_mode(&self) -> bool {
        self.with_writer(|conn| {
            let mode: String = conn.pragma_query_value(None, "journal_mode", |row| row.get(0))?;
            Ok(mode.eq_ignore_ascii_case("wal"))
        })
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readers_see_committed_writes_in_rotation() {
        let dir = tempfile::tempdir().unwrap();
        let pool = ConnectionPool::open(&dir.path().join("pool.db"), 3).unwrap();
        assert_eq!(pool.reader_count(), 3);
        assert!(pool.is_wal_mode());

        pool.with_writer(|conn| {
            conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (7);")?;
            Ok(())
        })
        .unwrap();

        for _ in 0..3 {
            let x: i64 = pool
                .with_reader(|conn| Ok(conn.query_row("SELECT x FROM t", [], |r| r.get(0))?))
                .unwrap();
            assert_eq!(x, 7);
        }
    }

    #[test]
    fn zero_readers_selects_default() {
        let dir = tempfile::tempdir().unwrap();
        let pool = ConnectionPool::open(&dir.path().join("pool.db"), 0).unwrap();
        assert_eq!(pool.reader_count(), DEFAULT_READ_POOL_SIZE);
    }

    #[test]
    fn in_memory_reads_go_through_writer() {
        let pool = ConnectionPool::open_in_memory().unwrap();
        assert_eq!(pool.reader_count(), 0);
        pool.with_writer(|conn| Ok(conn.execute_batch("CREATE TABLE t (x INTEGER)")?))
            .unwrap();
        let n: i64 = pool
            .with_reader(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(n, 0);
        assert!(!pool.is_wal_mode());
    }
}
