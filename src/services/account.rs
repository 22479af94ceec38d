//! Account service
//!
//! Registration, authentication, profile edits and two-step account
//! deletion. Plaintext passwords only pass through here on their way to
//! `crypto::hash_password`; audit entries carry the user without its hash.

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::crypto::{hash_password, verify_password, HashParams};
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::user::check_password_strength;
use crate::models::{User, UserId};
use crate::storage::{DeletionToken, Repository, Storage};

/// Result of a deletion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// Nothing deleted yet; repeat the call with `token`
    ConfirmationRequired { token: String, message: String },
    Deleted(User),
}

pub struct AccountService<'a> {
    storage: &'a Storage,
    hash_params: HashParams,
    token_ttl_minutes: i64,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_settings(storage, &Settings::default())
    }

    pub fn with_settings(storage: &'a Storage, settings: &Settings) -> Self {
        Self {
            storage,
            hash_params: settings.password_hash,
            token_ttl_minutes: settings.deletion_token_ttl_minutes,
        }
    }

    pub fn register(&self, email: &str, password: &str) -> EasyFinanceResult<User> {
        let mut user = User::new();
        user.set_email(Some(email))?;
        check_password_strength(password, "Password")?;

        if self.find_by_email(user.email())?.is_some() {
            return Err(EasyFinanceError::Duplicate {
                entity_type: "User",
                identifier: user.email().to_string(),
            });
        }

        let hash = hash_password(password, &self.hash_params)?;
        user.set_password_hash(Some(&hash))?;

        self.storage.users.save(user.clone())?;
        self.storage.users.flush()?;

        self.storage.log_create(
            EntityType::User,
            user.id().to_string(),
            Some(user.email().to_string()),
            &redacted(&user)?,
        )?;
        tracing::info!(user = %user.id(), "user registered");

        Ok(user)
    }

    /// Wrong email and wrong password fail the same way
    pub fn authenticate(&self, email: &str, password: &str) -> EasyFinanceResult<User> {
        let rejected = || EasyFinanceError::Authentication("invalid email or password".into());

        let user = self.find_by_email(email)?.ok_or_else(rejected)?;
        if !verify_password(password, user.password_hash())? {
            tracing::warn!(user = %user.id(), "authentication failed");
            return Err(rejected());
        }

        Ok(user)
    }

    pub fn get(&self, id: UserId) -> EasyFinanceResult<User> {
        self.storage
            .users
            .find(id)?
            .ok_or_else(|| EasyFinanceError::user_not_found(id.to_string()))
    }

    pub fn find_by_email(&self, email: &str) -> EasyFinanceResult<Option<User>> {
        let email = email.trim().to_lowercase();
        self.storage.users.find_by(|u| u.email() == email)
    }

    /// Apply the given profile fields; `None` leaves a field as it is
    pub fn update_profile(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
        preferred_currency: Option<&str>,
    ) -> EasyFinanceResult<User> {
        self.modify(id, "profile updated", |user| {
            if let Some(first) = first_name {
                user.set_first_name(Some(first))?;
            }
            if let Some(last) = last_name {
                user.set_last_name(Some(last))?;
            }
            if let Some(currency) = preferred_currency {
                user.set_preferred_currency(Some(currency))?;
            }
            Ok(())
        })
    }

    pub fn change_email(&self, id: UserId, email: &str) -> EasyFinanceResult<User> {
        if let Some(other) = self.find_by_email(email)? {
            if other.id() != id {
                return Err(EasyFinanceError::Duplicate {
                    entity_type: "User",
                    identifier: other.email().to_string(),
                });
            }
        }

        self.modify(id, "email changed", |user| {
            user.set_email(Some(email))?;
            Ok(())
        })
    }

    pub fn change_password(&self, id: UserId, current: &str, new: &str) -> EasyFinanceResult<User> {
        let user = self.get(id)?;
        if !verify_password(current, user.password_hash())? {
            return Err(EasyFinanceError::Authentication(
                "current password is incorrect".into(),
            ));
        }
        check_password_strength(new, "NewPassword")?;
        let hash = hash_password(new, &self.hash_params)?;

        self.modify(id, "password changed", |user| {
            user.set_password_hash(Some(&hash))?;
            Ok(())
        })
    }

    fn token_ttl(&self) -> EasyFinanceResult<Duration> {
        if self.token_ttl_minutes < 0 {
            return Err(EasyFinanceError::Config(format!(
                "deletion_token_ttl_minutes must not be negative, got {}",
                self.token_ttl_minutes
            )));
        }
        Duration::try_minutes(self.token_ttl_minutes).ok_or_else(|| {
            EasyFinanceError::Config(format!(
                "deletion_token_ttl_minutes out of range: {}",
                self.token_ttl_minutes
            ))
        })
    }

    /// Two-step deletion
    ///
    /// Without a token a fresh confirmation token is issued, replacing any
    /// pending one. With a token the account is deleted if the token matches
    /// the pending one and has not expired.
    pub fn delete(&self, id: UserId, token: Option<&str>) -> EasyFinanceResult<DeletionOutcome> {
        let user = self.get(id)?;

        let Some(candidate) = token else {
            let message = format!(
                "Deleting the account {} removes it permanently. Repeat the request with the confirmation token within {} minutes.",
                user.email(),
                self.token_ttl_minutes
            );
            let issued = DeletionToken::issue(id, message, self.token_ttl()?)?;
            self.storage.deletion_tokens.save(issued.clone())?;
            self.storage.deletion_tokens.flush()?;
            tracing::info!(user = %id, expires_at = %issued.expires_at, "deletion token issued");

            return Ok(DeletionOutcome::ConfirmationRequired {
                token: issued.token,
                message: issued.message,
            });
        };

        let pending = self
            .storage
            .deletion_tokens
            .find(id)?
            .ok_or(EasyFinanceError::InvalidToken)?;

        let now = Utc::now();
        if !pending.accepts(candidate, now) {
            if pending.is_expired_at(now) {
                self.storage.deletion_tokens.delete(id)?;
                self.storage.deletion_tokens.flush()?;
            }
            tracing::warn!(user = %id, "deletion token rejected");
            return Err(EasyFinanceError::InvalidToken);
        }

        self.storage.users.delete(id)?;
        self.storage.deletion_tokens.delete(id)?;
        self.storage.users.flush()?;
        self.storage.deletion_tokens.flush()?;

        self.storage.log_delete(
            EntityType::User,
            id.to_string(),
            Some(user.email().to_string()),
            &redacted(&user)?,
        )?;
        tracing::info!(user = %id, "user deleted");

        Ok(DeletionOutcome::Deleted(user))
    }

    fn modify<F>(&self, id: UserId, summary: &str, change: F) -> EasyFinanceResult<User>
    where
        F: FnOnce(&mut User) -> EasyFinanceResult<()>,
    {
        let before = self.get(id)?;
        let mut after = before.clone();
        change(&mut after)?;

        self.storage.users.save(after.clone())?;
        self.storage.users.flush()?;

        self.storage.log_update(
            EntityType::User,
            id.to_string(),
            Some(after.email().to_string()),
            &redacted(&before)?,
            &redacted(&after)?,
            Some(summary.to_string()),
        )?;

        Ok(after)
    }
}

/// The user as JSON without its password hash
fn redacted(user: &User) -> EasyFinanceResult<Value> {
    let mut value = serde_json::to_value(user)?;
    if let Value::Object(map) = &mut value {
        map.remove("password_hash");
    }
    Ok(value)
}
