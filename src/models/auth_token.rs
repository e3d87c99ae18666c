//! Session tokens issued to authenticated users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// An opaque bearer token; each user holds at most one
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub key: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(key: impl Into<String>, user_id: UserId) -> Self {
        Self {
            key: key.into(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("key", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}
