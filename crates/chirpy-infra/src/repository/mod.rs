//! Repository implementations backed by the JSON document store.

mod chirps;
mod users;

pub use chirps::JsonChirpRepository;
pub use users::JsonUserRepository;
