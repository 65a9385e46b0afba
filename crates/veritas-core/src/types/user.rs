//! User accounts.

use serde::{Deserialize, Serialize};

/// Row id of a user account.
pub type UserId = i64;

/// A registered account. The API token itself is never stored, only its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: String,
}
