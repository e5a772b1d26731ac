//! JWT access token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use chirpy_core::ports::{AuthError, TokenClaims, TokenService};

/// Access tokens live for one hour. Callers cannot choose a longer window.
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 1;

pub const DEFAULT_ISSUER: &str = "chirpy";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret. Token operations fail while this is unset.
    pub secret: Option<String>,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

impl JwtConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        if secret.is_none() {
            tracing::error!(
                "SECURITY: JWT_SECRET is not set. Login, refresh and authenticated routes will fail."
            );
        }

        Self {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.to_string()),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String, // user id
    iat: i64,
    exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// HS256 JWT token service.
pub struct JwtTokenService {
    keys: Option<Keys>,
    issuer: String,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let keys = config.secret.as_deref().map(|secret| Keys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        });

        Self {
            keys,
            issuer: config.issuer,
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }

    fn keys(&self) -> Result<&Keys, AuthError> {
        self.keys.as_ref().ok_or(AuthError::MissingSecret)
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: i64) -> Result<String, AuthError> {
        let keys = self.keys()?;
        let now = Utc::now();
        let exp = now + TimeDelta::hours(ACCESS_TOKEN_TTL_HOURS);

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let keys = self.keys()?;

        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let token_data =
            decode::<Claims>(token, &keys.decoding, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        let user_id = token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|e| AuthError::InvalidToken(format!("bad subject: {e}")))?;

        Ok(TokenClaims {
            user_id,
            issued_at: token_data.claims.iat,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        ACCESS_TOKEN_TTL_HOURS * 3600
    }
}
