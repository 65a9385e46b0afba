//! Request and response bodies.

use serde::{Deserialize, Serialize};
use veritas_core::types::history::{ContentKind, NewHistoryEntry};
use veritas_core::types::user::UserId;

use crate::errors::AppError;

/// Body of `POST /api/history`. Every field is required; they are optional
/// here so a missing one yields a 400 instead of a deserializer error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
    pub score: Option<f64>,
    pub confidence: Option<f64>,
    pub date: Option<String>,
    pub full_content: Option<String>,
    pub analysis: Option<String>,
}

impl NewHistoryRequest {
    pub fn into_entry(self, user_id: UserId) -> Result<NewHistoryEntry, AppError> {
        let (
            Some(kind),
            Some(content),
            Some(score),
            Some(confidence),
            Some(date),
            Some(full_content),
            Some(analysis),
        ) = (
            self.kind,
            self.content,
            self.score,
            self.confidence,
            self.date,
            self.full_content,
            self.analysis,
        )
        else {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        };

        let kind: ContentKind = kind.parse().map_err(AppError::BadRequest)?;
        Ok(NewHistoryEntry {
            user_id,
            kind,
            content,
            score: percentage("score", score)?,
            confidence: percentage("confidence", confidence)?,
            date,
            full_content,
            analysis,
        })
    }
}

fn percentage(field: &str, value: f64) -> Result<i64, AppError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "{field} must be between 0 and 100"
        )));
    }
    Ok(value.round_ties_even() as i64)
}

/// `{"status":"success","message":…}` with an optional id.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl StatusResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            status: "success",
            message,
            id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Response of `POST /api/detect/image`.
#[derive(Debug, Serialize)]
pub struct DetectImageResponse {
    pub status: &'static str,
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub filename: String,
    pub path: String,
    pub score: i64,
    pub confidence: i64,
    pub analysis: String,
    pub date: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub wal_mode: bool,
    pub schema_version: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelHealth {
    pub loaded: bool,
    pub id: Option<String>,
    pub candidates: Vec<String>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: DatabaseHealth,
    pub model: ModelHealth,
}
