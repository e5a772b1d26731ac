//! Authentication and authorization ports.

use crate::error::RepoError;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: i64,
    pub issued_at: i64,
    pub exp: i64,
}

/// Access token operations.
pub trait TokenService: Send + Sync {
    /// Generate a short-lived access token for a user.
    fn generate_token(&self, user_id: i64) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("No signing secret configured")]
    MissingSecret,

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl AuthError {
    /// Whether this is a caller problem (401) rather than a server fault.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::TokenExpired | Self::InvalidToken(_) | Self::MissingAuth
        )
    }
}
