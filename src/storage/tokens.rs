//! Account-deletion confirmation tokens
//!
//! At most one pending token per user; issuing a new one replaces the old.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repository::Entity;
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionToken {
    pub user_id: UserId,
    pub token: String,
    pub message: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl DeletionToken {
    /// Issue a fresh random token valid for `ttl`
    pub fn issue(
        user_id: UserId,
        message: impl Into<String>,
        ttl: Duration,
    ) -> EasyFinanceResult<Self> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            EasyFinanceError::Config(format!("deletion token lifetime out of range: {}", ttl))
        })?;

        Ok(Self {
            user_id,
            token: URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes()),
            message: message.into(),
            issued_at: now,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Token matches and has not expired
    pub fn accepts(&self, candidate: &str, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now) && self.token == candidate
    }
}

impl Entity for DeletionToken {
    type Id = UserId;

    fn entity_id(&self) -> UserId {
        self.user_id
    }

    fn sort_key(&self) -> String {
        self.issued_at.to_rfc3339()
    }
}
