//! # veritas-core
//!
//! Foundation crate for the Veritas detection service.
//! Defines the shared types, storage traits, errors, config and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::VeritasConfig;
pub use errors::error_code::VeritasErrorCode;
pub use errors::{VeritasError, VeritasResult};
pub use traits::IVeritasStorage;
pub use types::history::{ContentKind, HistoryEntry, NewHistoryEntry};
pub use types::user::{User, UserId};
