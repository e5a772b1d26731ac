//! User repository over the JSON document store.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use chirpy_core::domain::{PublicUser, User};
use chirpy_core::error::RepoError;
use chirpy_core::ports::UserRepository;

use crate::store::JsonFileStore;

/// Mask an email for logging to avoid PII in logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

pub struct JsonUserRepository {
    store: Arc<JsonFileStore>,
}

impl JsonUserRepository {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }
}

impl UserRepository for JsonUserRepository {
    fn create(&self, email: &str, password_hash: &str) -> Result<PublicUser, RepoError> {
        let user = self.store.write(|doc| {
            if doc.user_by_email(email).is_some() {
                return Err(RepoError::Conflict("Email already registered".to_string()));
            }
            Ok(doc.insert_user(email.to_string(), password_hash.to_string())?)
        })?;

        tracing::debug!(user_id = user.id, user_email = %mask_email(email), "Created user");
        Ok(user.to_public())
    }

    fn update(&self, id: i64, email: &str, password_hash: &str) -> Result<PublicUser, RepoError> {
        self.store.write(|doc| {
            if doc.user(id).is_none() {
                return Err(RepoError::not_found("User", id));
            }
            if doc.user_by_email(email).is_some_and(|other| other.id != id) {
                return Err(RepoError::Conflict("Email already registered".to_string()));
            }

            doc.update_user(id, |user| {
                user.email = email.to_string();
                user.password_hash = password_hash.to_string();
            })
            .map(User::to_public)
            .ok_or_else(|| RepoError::not_found("User", id))
        })
    }

    fn get_by_email(&self, email: &str) -> Result<User, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        self.store.read(|doc| {
            doc.user_by_email(email)
                .cloned()
                .ok_or_else(|| RepoError::not_found("User", mask_email(email)))
        })
    }

    fn get_by_id(&self, id: i64) -> Result<User, RepoError> {
        self.store.read(|doc| {
            doc.user(id)
                .cloned()
                .ok_or_else(|| RepoError::not_found("User", id))
        })
    }

    fn exists(&self, email: &str) -> Result<bool, RepoError> {
        match self.get_by_email(email) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn upgrade(&self, id: i64) -> Result<PublicUser, RepoError> {
        let user = self.store.write(|doc| {
            doc.update_user(id, |user| user.is_upgraded = true)
                .map(User::to_public)
                .ok_or_else(|| RepoError::not_found("User", id))
        })?;

        tracing::info!(user_id = id, "Upgraded user");
        Ok(user)
    }

    fn set_refresh_token(
        &self,
        id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        self.store.write(|doc| {
            doc.update_user(id, |user| {
                user.refresh_token = token.to_string();
                user.refresh_token_expiry = Some(expires_at);
            })
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("User", id))
        })
    }

    fn get_by_refresh_token(&self, token: &str) -> Result<User, RepoError> {
        self.store.read(|doc| {
            doc.user_by_refresh_token(token)
                .cloned()
                .ok_or_else(|| RepoError::not_found("Refresh token", "<redacted>"))
        })
    }

    fn revoke_refresh_token(&self, token: &str, at: DateTime<Utc>) -> Result<bool, RepoError> {
        self.store.write(|doc| {
            let Some(id) = doc
                .user_by_refresh_token(token)
                .filter(|user| user.has_live_refresh_token(token, at))
                .map(|user| user.id)
            else {
                return Ok(false);
            };

            doc.update_user(id, |user| {
                user.refresh_token_expiry = Some(at - TimeDelta::seconds(1));
            });
            Ok::<_, RepoError>(true)
        })
    }
}
