//! Domain entities - the core business objects.

mod chirp;
mod document;
mod user;

pub use chirp::{Chirp, SortDirection};
pub use document::{Document, Sequences};
pub use user::{PublicUser, User};
