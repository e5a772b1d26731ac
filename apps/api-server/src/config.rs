//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use chirpy_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Location of the JSON document store.
    pub database_path: PathBuf,
    pub jwt: JwtConfig,
    /// Shared key the payment provider sends with webhooks.
    pub polka_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let polka_key = env::var("POLKA_KEY").ok().filter(|k| !k.is_empty());
        if polka_key.is_none() {
            tracing::warn!("POLKA_KEY not set. Upgrade webhooks will be rejected.");
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("database.json")),
            jwt: JwtConfig::from_env(),
            polka_key,
        }
    }
}
