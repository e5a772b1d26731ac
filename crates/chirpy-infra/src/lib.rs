//! # Chirpy Infrastructure
//!
//! Concrete implementations of the ports defined in `chirpy-core`:
//! the JSON document store, the repositories built on it, the profanity
//! filter, and the credential and token services.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `auth` - JWT + Argon2 authentication and refresh tokens

pub mod filter;
pub mod repository;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

pub use filter::ProfanityFilter;
pub use repository::{JsonChirpRepository, JsonUserRepository};
pub use store::JsonFileStore;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, RefreshTokenService};
