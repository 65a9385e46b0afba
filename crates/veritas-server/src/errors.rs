//! HTTP error mapping.
//!
//! Every failure leaves the server as `{"status":"error","message":…}` with a
//! stable `code`, the shape browser clients already handle.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use veritas_core::errors::{error_code, DetectionError, StorageError};
use veritas_core::VeritasErrorCode;

/// Application-level errors returned by handlers and extractors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Detection {
        message: String,
        #[source]
        source: DetectionError,
    },

    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: StorageError,
    },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a storage failure with the message shown to the client.
    pub fn storage(context: &str, source: StorageError) -> Self {
        Self::Storage {
            message: format!("{context}: {source}"),
            source,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => error_code::INVALID_INPUT,
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound(_) => error_code::NOT_FOUND,
            Self::Detection { source, .. } => source.error_code(),
            Self::Storage { source, .. } => source.error_code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DetectionError> for AppError {
    fn from(source: DetectionError) -> Self {
        let message = match &source {
            DetectionError::InvalidImage { .. } | DetectionError::ModelUnavailable { .. } => {
                source.to_string()
            }
            other => format!("Detection failed: {other}"),
        };
        Self::Detection { message, source }
    }
}

impl From<StorageError> for AppError {
    fn from(source: StorageError) -> Self {
        Self::Storage {
            message: source.to_string(),
            source,
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        Self::Internal(format!("blocking task failed: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Detection { source, .. } => match source {
                DetectionError::InvalidImage { .. } => StatusCode::BAD_REQUEST,
                DetectionError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Storage { source, .. } => match source {
                StorageError::DbBusy => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            status: "error",
            message: self.to_string(),
            code: self.code(),
        })
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
    code: &'static str,
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undecodable_image_is_a_client_error() {
        let err: AppError = DetectionError::InvalidImage {
            path: "x.png".into(),
            reason: "bad header".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Failed to open image 'x.png': bad header");
    }

    #[test]
    fn missing_model_is_unavailable() {
        let err: AppError = DetectionError::ModelUnavailable {
            last_error: "timeout".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "MODEL_UNAVAILABLE");
    }

    #[test]
    fn inference_failure_is_prefixed() {
        let err: AppError = DetectionError::InferenceFailed {
            model: "m".into(),
            reason: "502".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Detection failed: "));
    }

    #[test]
    fn busy_database_is_unavailable() {
        let err = AppError::storage("Failed to save history", StorageError::DbBusy);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().starts_with("Failed to save history: "));
    }
}
