//! # Chirpy Core
//!
//! The domain layer of the Chirpy micro-post service.
//! This crate contains the record types, the persisted document shape and
//! the port traits; it performs no I/O of its own.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError, StoreError};
