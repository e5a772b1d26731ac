use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity as persisted, including credentials and session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(rename = "password", default)]
    pub password_hash: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(
        rename = "expires_in_seconds_refresh",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token_expiry: Option<DateTime<Utc>>,
    #[serde(rename = "is_chirpy_red", default)]
    pub is_upgraded: bool,
}

impl User {
    /// Create a user with no session and no upgrade.
    pub fn new(id: i64, email: String, password_hash: String) -> Self {
        Self {
            id,
            email,
            password_hash,
            refresh_token: String::new(),
            refresh_token_expiry: None,
            is_upgraded: false,
        }
    }

    /// Whether `token` is this user's refresh token and it has not expired at `now`.
    pub fn has_live_refresh_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        !token.is_empty()
            && self.refresh_token == token
            && self.refresh_token_expiry.is_some_and(|exp| exp > now)
    }

    /// Public projection without credentials.
    pub fn to_public(&self) -> PublicUser {
        PublicUser::from(self)
    }
}

/// User fields safe to hand back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    #[serde(rename = "is_chirpy_red")]
    pub is_upgraded: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_upgraded: user.is_upgraded,
        }
    }
}
