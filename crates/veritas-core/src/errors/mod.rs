//! Error types for every Veritas subsystem.
//! Subsystem errors convert into [`VeritasError`] via `From`.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod storage_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::VeritasErrorCode;
pub use storage_error::StorageError;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum VeritasError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VeritasErrorCode for VeritasError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Detection(e) => e.error_code(),
            Self::Io(_) => error_code::IO_ERROR,
        }
    }
}

/// Convenience type alias.
pub type VeritasResult<T> = Result<T, VeritasError>;

pub type StorageResult<T> = Result<T, StorageError>;
pub type DetectionResult<T> = Result<T, DetectionError>;
