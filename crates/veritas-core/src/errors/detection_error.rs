//! Image detection errors.

use super::error_code::{self, VeritasErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    /// The classifier output violated a precondition (e.g. it was empty).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to open image '{path}': {reason}")]
    InvalidImage { path: String, reason: String },

    #[error("Failed to load any detector. Last error: {last_error}")]
    ModelUnavailable { last_error: String },

    #[error("Inference failed on model {model}: {reason}")]
    InferenceFailed { model: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VeritasErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => error_code::INVALID_INPUT,
            Self::InvalidImage { .. } => error_code::INVALID_IMAGE,
            Self::ModelUnavailable { .. } => error_code::MODEL_UNAVAILABLE,
            Self::InferenceFailed { .. } => error_code::INFERENCE_FAILED,
            Self::Io(_) => error_code::IO_ERROR,
        }
    }
}
