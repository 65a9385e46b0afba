//! Stable error codes shared by every Veritas error type.
//!
//! Codes are part of the HTTP error body and the CLI exit message, so they
//! never change once published.

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const DUPLICATE_KEY: &str = "DUPLICATE_KEY";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const INVALID_IMAGE: &str = "INVALID_IMAGE";
pub const MODEL_UNAVAILABLE: &str = "MODEL_UNAVAILABLE";
pub const INFERENCE_FAILED: &str = "INFERENCE_FAILED";
pub const IO_ERROR: &str = "IO_ERROR";

/// Maps an error to its stable string code.
pub trait VeritasErrorCode {
    fn error_code(&self) -> &'static str;
}
