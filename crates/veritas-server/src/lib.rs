//! # veritas-server
//!
//! actix-web application for the Veritas detection service: bearer-token
//! authentication, the history API, image upload + detection, and health.

pub mod app;
pub mod cli;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod uploads;

pub use app::{configure, run, AppState};
pub use errors::{AppError, AppResult};
