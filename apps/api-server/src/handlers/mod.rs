//! HTTP handlers and route configuration.

mod auth;
mod chirps;
mod health;
mod users;
mod webhooks;

use actix_web::web;

use chirpy_core::domain::PublicUser;
use chirpy_shared::dto::UserResponse;

fn user_response(user: &PublicUser) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email.clone(),
        is_chirpy_red: user.is_upgraded,
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/healthz", web::get().to(health::health_check))
            // Users and sessions
            .route("/users", web::post().to(users::register))
            .route("/users", web::put().to(users::update))
            .route("/login", web::post().to(auth::login))
            .route("/refresh", web::post().to(auth::refresh))
            .route("/revoke", web::post().to(auth::revoke))
            // Chirps
            .route("/chirps", web::post().to(chirps::create))
            .route("/chirps", web::get().to(chirps::list))
            .route("/chirps/{id}", web::get().to(chirps::get))
            .route("/chirps/{id}", web::delete().to(chirps::delete))
            // Webhooks
            .route("/polka/webhooks", web::post().to(webhooks::polka)),
    );
}
