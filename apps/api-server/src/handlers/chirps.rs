//! Chirp handlers.

use actix_web::{HttpResponse, web};

use chirpy_core::domain::{Chirp, SortDirection};
use chirpy_shared::dto::{ChirpListQuery, ChirpResponse, CreateChirpRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn chirp_response(chirp: Chirp) -> ChirpResponse {
    ChirpResponse {
        id: chirp.id,
        body: chirp.body,
        author_id: chirp.author_id,
    }
}

/// POST /api/chirps - Protected route
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateChirpRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    Chirp::validate_body(&req.body)?;

    let chirp = web::block(move || state.chirps.create(&req.body, identity.user_id)).await??;

    Ok(HttpResponse::Created().json(chirp_response(chirp)))
}

/// GET /api/chirps?author_id=<id>&sort=asc|desc
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ChirpListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let direction = SortDirection::parse(query.sort.as_deref());

    let chirps = web::block(move || match query.author_id {
        Some(author_id) => state.chirps.list_by_author(author_id, direction),
        None => state.chirps.list().map(|mut chirps| {
            direction.sort(&mut chirps);
            chirps
        }),
    })
    .await??;

    let body: Vec<ChirpResponse> = chirps.into_iter().map(chirp_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/chirps/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let chirp = web::block(move || state.chirps.get(id)).await??;
    Ok(HttpResponse::Ok().json(chirp_response(chirp)))
}

/// DELETE /api/chirps/{id} - Protected route, author only
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    web::block(move || state.chirps.delete(id, identity.user_id)).await??;
    Ok(HttpResponse::NoContent().finish())
}
