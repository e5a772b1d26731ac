//! Opaque refresh tokens stored on the user record.

use std::sync::Arc;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{TimeDelta, Utc};

use chirpy_core::ports::{AuthError, TokenService, UserRepository};

/// Random bytes per refresh token, before hex encoding.
pub const REFRESH_TOKEN_BYTES: usize = 128;

/// Refresh tokens live for 60 days.
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 1440;

/// Issues, exchanges and revokes refresh tokens.
///
/// A user holds at most one refresh token. It stays usable until it expires
/// or is revoked; exchanging it for an access token does not replace it.
pub struct RefreshTokenService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl RefreshTokenService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Generate a fresh token for `user_id` and store it with a new expiry.
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AuthError::Entropy(e.to_string()))?;
        let token = hex::encode(bytes);

        let expires_at = Utc::now() + TimeDelta::hours(REFRESH_TOKEN_TTL_HOURS);
        self.users.set_refresh_token(user_id, &token, expires_at)?;

        tracing::debug!(user_id, %expires_at, "Issued refresh token");
        Ok(token)
    }

    /// Exchange a live refresh token for a new access token.
    ///
    /// Returns `None` when no user holds the token or it has expired or been revoked.
    pub fn validate(&self, token: &str) -> Result<Option<String>, AuthError> {
        let user = match self.users.get_by_refresh_token(token) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if !user.has_live_refresh_token(token, Utc::now()) {
            tracing::debug!(user_id = user.id, "Refresh token expired or revoked");
            return Ok(None);
        }

        self.tokens.generate_token(user.id).map(Some)
    }

    /// Revoke a live token. Returns whether anything was revoked.
    pub fn revoke(&self, token: &str) -> Result<bool, AuthError> {
        let revoked = self.users.revoke_refresh_token(token, Utc::now())?;
        if revoked {
            tracing::info!("Revoked refresh token");
        }
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::auth::jwt::{JwtConfig, JwtTokenService};
    use crate::repository::JsonUserRepository;
    use crate::store::JsonFileStore;

    struct Fixture {
        _dir: TempDir,
        store: Arc<JsonFileStore>,
        users: Arc<JsonUserRepository>,
        tokens: Arc<JwtTokenService>,
        service: RefreshTokenService,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path().join("database.json")).unwrap());
        let users = Arc::new(JsonUserRepository::new(store.clone()));
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            secret: Some("refresh-test-secret".to_string()),
            ..JwtConfig::default()
        }));
        let service = RefreshTokenService::new(users.clone(), tokens.clone());
        Fixture {
            _dir: dir,
            store,
            users,
            tokens,
            service,
        }
    }

    #[test]
    fn test_issue_then_validate() {
        let f = fixture();
        let user = f.users.create("a@x.com", "hash").unwrap();

        let refresh = f.service.issue(user.id).unwrap();
        assert_eq!(refresh.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(refresh.chars().all(|c| c.is_ascii_hexdigit()));

        let access = f.service.validate(&refresh).unwrap().unwrap();
        assert_eq!(f.tokens.validate_token(&access).unwrap().user_id, user.id);

        // Not rotated: the same token keeps working.
        assert!(f.service.validate(&refresh).unwrap().is_some());
    }

    #[test]
    fn test_issue_sets_sixty_day_expiry() {
        let f = fixture();
        let user = f.users.create("a@x.com", "hash").unwrap();
        let before = Utc::now();

        let refresh = f.service.issue(user.id).unwrap();

        let stored = f.users.get_by_id(user.id).unwrap();
        assert_eq!(stored.refresh_token, refresh);
        let expiry = stored.refresh_token_expiry.unwrap();
        assert!(expiry >= before + TimeDelta::days(60));
        assert!(expiry <= Utc::now() + TimeDelta::days(60));
    }

    #[test]
    fn test_issue_for_unknown_user_fails() {
        let f = fixture();
        assert!(matches!(f.service.issue(9), Err(AuthError::Repo(e)) if e.is_not_found()));
    }

    #[test]
    fn test_revoke_then_validate_is_invalid() {
        let f = fixture();
        let user = f.users.create("a@x.com", "hash").unwrap();
        let refresh = f.service.issue(user.id).unwrap();

        assert!(f.service.revoke(&refresh).unwrap());
        assert!(f.service.validate(&refresh).unwrap().is_none());
        assert!(!f.service.revoke(&refresh).unwrap());
    }

    #[test]
    fn test_revocation_survives_restart() {
        let f = fixture();
        let user = f.users.create("a@x.com", "hash").unwrap();
        let refresh = f.service.issue(user.id).unwrap();
        f.service.revoke(&refresh).unwrap();

        let reopened = Arc::new(JsonFileStore::open(f.store.path()).unwrap());
        let service = RefreshTokenService::new(
            Arc::new(JsonUserRepository::new(reopened)),
            f.tokens.clone(),
        );

        assert!(service.validate(&refresh).unwrap().is_none());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let f = fixture();
        let user = f.users.create("a@x.com", "hash").unwrap();
        f.users
            .set_refresh_token(user.id, "stale", Utc::now() - TimeDelta::minutes(1))
            .unwrap();

        assert!(f.service.validate("stale").unwrap().is_none());
        assert!(!f.service.revoke("stale").unwrap());
    }

    #[test]
    fn test_unknown_and_empty_tokens_are_invalid() {
        let f = fixture();
        f.users.create("a@x.com", "hash").unwrap();

        assert!(f.service.validate("nope").unwrap().is_none());
        assert!(f.service.validate("").unwrap().is_none());
        assert!(!f.service.revoke("").unwrap());
    }

    #[test]
    fn test_new_login_replaces_revoked_token() {
        let f = fixture();
        let user = f.users.create("a@x.com", "hash").unwrap();
        let old = f.service.issue(user.id).unwrap();
        f.service.revoke(&old).unwrap();

        let new = f.service.issue(user.id).unwrap();

        assert_ne!(old, new);
        assert!(f.service.validate(&old).unwrap().is_none());
        assert!(f.service.validate(&new).unwrap().is_some());
    }
}
