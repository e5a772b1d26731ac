//! Login and session handlers.

use actix_web::{HttpResponse, web};

use chirpy_shared::dto::{CredentialsRequest, LoginResponse, TokenResponse};

use crate::middleware::auth::BearerToken;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let response = web::block(move || -> AppResult<LoginResponse> {
        let user = match state.users.get_by_email(&req.email) {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                let _ = state.passwords.verify(&req.password, &state.dummy_hash);
                return Err(AppError::Unauthorized("Incorrect email or password".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !state.passwords.verify(&req.password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Incorrect email or password".to_string()));
        }

        let token = state.tokens.generate_token(user.id)?;
        let refresh_token = state.refresh.issue(user.id)?;

        Ok(LoginResponse {
            id: user.id,
            email: user.email,
            is_chirpy_red: user.is_upgraded,
            token,
            refresh_token,
        })
    })
    .await??;

    tracing::info!(user_id = response.id, "User logged in");
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/refresh - exchange a refresh token for an access token
pub async fn refresh(state: web::Data<AppState>, bearer: BearerToken) -> AppResult<HttpResponse> {
    let token = web::block(move || state.refresh.validate(&bearer.0)).await??;

    match token {
        Some(token) => Ok(HttpResponse::Ok().json(TokenResponse { token })),
        None => Err(AppError::Unauthorized(
            "Refresh token is invalid, expired or revoked".to_string(),
        )),
    }
}

/// POST /api/revoke
pub async fn revoke(state: web::Data<AppState>, bearer: BearerToken) -> AppResult<HttpResponse> {
    web::block(move || state.refresh.revoke(&bearer.0)).await??;
    Ok(HttpResponse::NoContent().finish())
}
