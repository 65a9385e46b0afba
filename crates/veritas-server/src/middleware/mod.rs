//! Request middleware: bearer-token authentication and access logging.

pub mod auth;
pub mod logging;

pub use auth::{generate_token, hash_token, AuthMiddleware, AuthenticatedUser};
pub use logging::LoggingMiddleware;
