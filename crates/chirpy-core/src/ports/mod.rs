//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod filter;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use filter::BodyFilter;
pub use repository::{ChirpRepository, UserRepository};
