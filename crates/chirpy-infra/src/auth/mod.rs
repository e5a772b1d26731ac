//! Authentication implementations.

mod jwt;
mod password;
mod refresh;

pub use jwt::{ACCESS_TOKEN_TTL_HOURS, DEFAULT_ISSUER, JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
pub use refresh::{REFRESH_TOKEN_BYTES, REFRESH_TOKEN_TTL_HOURS, RefreshTokenService};
