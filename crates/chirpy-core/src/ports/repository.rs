use chrono::{DateTime, Utc};

use crate::domain::{Chirp, PublicUser, SortDirection, User};
use crate::error::RepoError;

/// Chirp storage.
pub trait ChirpRepository: Send + Sync {
    /// Filter `body` and store it as a new chirp.
    fn create(&self, body: &str, author_id: i64) -> Result<Chirp, RepoError>;

    fn get(&self, id: i64) -> Result<Chirp, RepoError>;

    /// All chirps, newest first.
    fn list(&self) -> Result<Vec<Chirp>, RepoError>;

    fn list_by_author(
        &self,
        author_id: i64,
        direction: SortDirection,
    ) -> Result<Vec<Chirp>, RepoError>;

    /// Remove a chirp. Only its author may do so.
    fn delete(&self, id: i64, requester_id: i64) -> Result<(), RepoError>;
}

/// User storage, including the refresh-token slot of each user.
pub trait UserRepository: Send + Sync {
    /// Register a user. Fails with `Conflict` if the email is taken.
    fn create(&self, email: &str, password_hash: &str) -> Result<PublicUser, RepoError>;

    /// Replace email and password, keeping session and upgrade state.
    fn update(&self, id: i64, email: &str, password_hash: &str) -> Result<PublicUser, RepoError>;

    fn get_by_email(&self, email: &str) -> Result<User, RepoError>;

    fn get_by_id(&self, id: i64) -> Result<User, RepoError>;

    fn exists(&self, email: &str) -> Result<bool, RepoError>;

    /// Mark a user as upgraded. Idempotent.
    fn upgrade(&self, id: i64) -> Result<PublicUser, RepoError>;

    fn set_refresh_token(
        &self,
        id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepoError>;

    fn get_by_refresh_token(&self, token: &str) -> Result<User, RepoError>;

    /// Expire `token` as of `at` if it is still live. Returns whether it was.
    fn revoke_refresh_token(&self, token: &str, at: DateTime<Utc>) -> Result<bool, RepoError>;
}
