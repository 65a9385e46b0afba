//! Account queries.

use rusqlite::{params, Connection, OptionalExtension, Row};
use veritas_core::errors::StorageResult;
use veritas_core::types::user::{User, UserId};

const USER_COLUMNS: &str = "id, username, created_at";

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        created_at: row.get(2)?,
    })
}

pub fn insert_user(
    conn: &Connection,
    username: &str,
    token_hash: &str,
    created_at: &str,
) -> StorageResult<User> {
    conn.execute(
        "INSERT INTO users (username, token_hash, created_at) VALUES (?1, ?2, ?3)",
        params![username, token_hash, created_at],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        created_at: created_at.to_string(),
    })
}

pub fn get_user(conn: &Connection, id: UserId) -> StorageResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], map_user).optional()?)
}

pub fn get_user_by_username(conn: &Connection, username: &str) -> StorageResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
    Ok(conn.query_row(&sql, params![username], map_user).optional()?)
}

pub fn find_by_token_hash(conn: &Connection, token_hash: &str) -> StorageResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE token_hash = ?1");
    Ok(conn.query_row(&sql, params![token_hash], map_user).optional()?)
}

pub fn update_token_hash(conn: &Connection, id: UserId, token_hash: &str) -> StorageResult<bool> {
    let changed = conn.execute(
        "UPDATE users SET token_hash = ?1 WHERE id = ?2",
        params![token_hash, id],
    )?;
    Ok(changed > 0)
}

pub fn list_users(conn: &Connection) -> StorageResult<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_user)?;
    let mut users = Vec::new();
    for row in rows {
        users.push(row?);
    }
    Ok(users)
}

/// History rows go with the user via `ON DELETE CASCADE`.
pub fn delete_user(conn: &Connection, id: UserId) -> StorageResult<bool> {
    let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}
