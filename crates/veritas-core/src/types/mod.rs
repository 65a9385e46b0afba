//! Shared domain types.

pub mod history;
pub mod user;
