//! Registration and profile handlers.

use actix_web::{HttpResponse, web};

use chirpy_shared::dto::CredentialsRequest;

use super::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn validate_credentials(req: &CredentialsRequest) -> AppResult<()> {
    if req.email.is_empty() || !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password must not be empty".to_string()));
    }
    Ok(())
}

/// POST /api/users
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_credentials(&req)?;

    let user = web::block(move || -> AppResult<_> {
        let hash = state.passwords.hash(&req.password)?;
        Ok(state.users.create(&req.email, &hash)?)
    })
    .await??;

    Ok(HttpResponse::Created().json(user_response(&user)))
}

/// PUT /api/users - Protected route
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_credentials(&req)?;

    let user = web::block(move || -> AppResult<_> {
        let hash = state.passwords.hash(&req.password)?;
        Ok(state.users.update(identity.user_id, &req.email, &hash)?)
    })
    .await??;

    Ok(HttpResponse::Ok().json(user_response(&user)))
}
