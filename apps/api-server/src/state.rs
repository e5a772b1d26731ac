//! Application state - shared across all handlers.

use std::sync::Arc;

use chirpy_core::error::StoreError;
use chirpy_core::ports::{ChirpRepository, PasswordService, TokenService, UserRepository};
use chirpy_infra::{
    Argon2PasswordService, JsonChirpRepository, JsonFileStore, JsonUserRepository,
    JwtTokenService, ProfanityFilter, RefreshTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub chirps: Arc<dyn ChirpRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub tokens: Arc<dyn TokenService>,
    pub refresh: Arc<RefreshTokenService>,
    pub polka_key: Option<String>,
    /// Hash checked against when a login names an unknown email, so both
    /// outcomes cost one Argon2 verification.
    pub dummy_hash: Arc<str>,
}

impl AppState {
    /// Open the document store and wire every service onto it.
    pub fn new(config: &AppConfig) -> Result<Self, StoreError> {
        let store = Arc::new(JsonFileStore::open(&config.database_path)?);
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        Ok(Self::with_store(store, tokens, config.polka_key.clone()))
    }

    pub fn with_store(
        store: Arc<JsonFileStore>,
        tokens: Arc<dyn TokenService>,
        polka_key: Option<String>,
    ) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(JsonUserRepository::new(store.clone()));
        let chirps: Arc<dyn ChirpRepository> = Arc::new(JsonChirpRepository::new(
            store,
            Arc::new(ProfanityFilter::default()),
        ));
        let refresh = Arc::new(RefreshTokenService::new(users.clone(), tokens.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let dummy_hash = passwords
            .hash("chirpy-unknown-user")
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to prepare placeholder password hash");
                String::new()
            });

        tracing::info!("Application state initialized");

        Self {
            users,
            chirps,
            passwords,
            tokens,
            refresh,
            polka_key,
            dummy_hash: dummy_hash.into(),
        }
    }
}
