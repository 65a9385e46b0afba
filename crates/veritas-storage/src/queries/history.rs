//! History queries. Every read and delete is filtered by owner.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use veritas_core::errors::StorageResult;
use veritas_core::types::history::{ContentKind, HistoryEntry, NewHistoryEntry};
use veritas_core::types::user::UserId;

const HISTORY_COLUMNS: &str =
    "id, type, content, score, confidence, date, full_content, analysis";

fn map_entry(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let kind: String = row.get(1)?;
    let kind: ContentKind = kind
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into()))?;
    Ok(HistoryEntry {
        id: row.get(0)?,
        kind,
        content: row.get(2)?,
        score: row.get(3)?,
        confidence: row.get(4)?,
        date: row.get(5)?,
        full_content: row.get(6)?,
        analysis: row.get(7)?,
    })
}

pub fn insert_entry(conn: &Connection, entry: &NewHistoryEntry) -> StorageResult<i64> {
    conn.execute(
        "INSERT INTO history (user_id, type, content, score, confidence, date, full_content, analysis)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.user_id,
            entry.kind.as_str(),
            entry.content,
            entry.score,
            entry.confidence,
            entry.date,
            entry.full_content,
            entry.analysis,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_entries(conn: &Connection, user_id: UserId) -> StorageResult<Vec<HistoryEntry>> {
    let sql = format!("SELECT {HISTORY_COLUMNS} FROM history WHERE user_id = ?1 ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], map_entry)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

pub fn get_entry(
    conn: &Connection,
    user_id: UserId,
    entry_id: i64,
) -> StorageResult<Option<HistoryEntry>> {
    let sql = format!("SELECT {HISTORY_COLUMNS} FROM history WHERE id = ?1 AND user_id = ?2");
    Ok(conn
        .query_row(&sql, params![entry_id, user_id], map_entry)
        .optional()?)
}

pub fn delete_entry(conn: &Connection, user_id: UserId, entry_id: i64) -> StorageResult<bool> {
    let changed = conn.execute(
        "DELETE FROM history WHERE id = ?1 AND user_id = ?2",
        params![entry_id, user_id],
    )?;
    Ok(changed > 0)
}

pub fn clear_entries(conn: &Connection, user_id: UserId) -> StorageResult<usize> {
    Ok(conn.execute("DELETE FROM history WHERE user_id = ?1", params![user_id])?)
}
