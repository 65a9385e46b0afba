//! Detection history records.
//!
//! Entries are created once and never updated; owners can only list, read and
//! delete them. The JSON shape (`type`, `fullContent`) is what browser clients
//! already consume.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;
use crate::constants::TIMESTAMP_FORMAT;

/// What kind of content a history entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    Video,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [Self::Text, Self::Image, Self::Video];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown content type: {s}"))
    }
}

/// A stored history row as returned to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Short description: a filename or a text preview.
    pub content: String,
    /// AI likelihood percentage, 0–100.
    pub score: i64,
    /// Confidence percentage, 0–100.
    pub confidence: i64,
    pub date: String,
    /// Full text, or the storage path of an uploaded file.
    pub full_content: String,
    pub analysis: String,
}

/// Values for a history row about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub user_id: UserId,
    pub kind: ContentKind,
    pub content: String,
    pub score: i64,
    pub confidence: i64,
    pub date: String,
    pub full_content: String,
    pub analysis: String,
}

/// Format a timestamp the way every history row stores it.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current time in history-row format.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}
