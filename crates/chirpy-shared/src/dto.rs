//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Email and password, used by registration, login and profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A user's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_chirpy_red: bool,
}

/// Successful login: the user plus both tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub email: String,
    pub is_chirpy_red: bool,
    pub token: String,
    pub refresh_token: String,
}

/// A freshly minted access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateChirpRequest {
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChirpResponse {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
}

/// Query string of `GET /api/chirps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChirpListQuery {
    pub author_id: Option<i64>,
    pub sort: Option<String>,
}

/// Payment provider webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub event: String,
    #[serde(default)]
    pub data: WebhookData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookData {
    #[serde(default)]
    pub user_id: i64,
}

impl WebhookRequest {
    pub const USER_UPGRADED: &'static str = "user.upgraded";
}
