//! Identity assertion carried inside access tokens.

use serde::{Deserialize, Serialize};

/// Claims included in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User identifier (users.id)
    #[serde(rename = "user_id")]
    pub subject_id: String,
    pub email: String,
    /// Issued-at (seconds since epoch)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiry (seconds since epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    /// An assertion is valid only while `now` is strictly before `expires_at`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
