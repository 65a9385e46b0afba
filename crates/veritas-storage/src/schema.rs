//! Table definitions.

/// Initial schema: accounts and their detection history.
pub const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    token_hash TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    type TEXT NOT NULL,
    content TEXT NOT NULL,
    score INTEGER NOT NULL,
    confidence INTEGER NOT NULL,
    date TEXT NOT NULL,
    full_content TEXT NOT NULL,
    analysis TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_history_user ON history(user_id);
";

pub const TABLE_NAMES: [&str; 2] = ["users", "history"];
