//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use subtle::ConstantTimeEq;

use chirpy_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Read `Authorization: <scheme> <value>` from the request.
fn authorization(req: &HttpRequest, scheme: &str) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix(' '))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidToken(format!("Expected {scheme} credentials")))
}

/// Authenticated user, proven by a valid access token.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: i64,
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        let result = authorization(req, "Bearer")
            .and_then(|token| state.tokens.validate_token(&token))
            .map(|claims| Identity {
                user_id: claims.user_id,
            })
            .map_err(AppError::from);

        ready(result)
    }
}

/// Raw Bearer credential, for routes that take a refresh token.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl FromRequest for BearerToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            authorization(req, "Bearer")
                .map(BearerToken)
                .map_err(AppError::from),
        )
    }
}

/// `Authorization: ApiKey <key>` credential sent by webhook callers.
#[derive(Debug, Clone)]
pub struct ApiKey(pub String);

impl ApiKey {
    /// Whether this key matches the configured one, compared in constant time.
    /// No key configured matches nothing.
    pub fn matches(&self, expected: Option<&str>) -> bool {
        expected.is_some_and(|key| {
            key.len() == self.0.len() && bool::from(key.as_bytes().ct_eq(self.0.as_bytes()))
        })
    }
}

impl FromRequest for ApiKey {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            authorization(req, "ApiKey")
                .map(ApiKey)
                .map_err(AppError::from),
        )
    }
}
