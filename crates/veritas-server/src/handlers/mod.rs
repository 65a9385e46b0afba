//! Route handlers.

pub mod detect;
pub mod health;
pub mod history;
