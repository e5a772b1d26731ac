//! Payment provider webhooks.

use actix_web::{HttpResponse, web};

use chirpy_shared::dto::WebhookRequest;

use crate::middleware::auth::ApiKey;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/polka/webhooks
///
/// Only `user.upgraded` does anything; other events are acknowledged and ignored.
pub async fn polka(
    state: web::Data<AppState>,
    api_key: ApiKey,
    body: web::Json<WebhookRequest>,
) -> AppResult<HttpResponse> {
    if !api_key.matches(state.polka_key.as_deref()) {
        return Err(AppError::Unauthorized("Invalid API key".to_string()));
    }

    let req = body.into_inner();
    if req.event != WebhookRequest::USER_UPGRADED {
        return Ok(HttpResponse::NoContent().finish());
    }

    let user_id = req.data.user_id;
    web::block(move || -> AppResult<()> {
        let user = state.users.get_by_id(user_id)?;
        state.users.upgrade(user.id)?;
        Ok(())
    })
    .await??;

    Ok(HttpResponse::NoContent().finish())
}
