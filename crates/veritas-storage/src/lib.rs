//! # veritas-storage
//!
//! SQLite persistence layer: one writer plus a round-robin read pool, WAL
//! mode, schema versioning via `PRAGMA user_version`, and the user/history
//! queries behind [`veritas_core::IVeritasStorage`].

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod pragmas;
pub mod queries;
pub mod schema;

pub use engine::StorageEngine;
pub use pool::ConnectionPool;
