use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Chirp entity - a short text post owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
}

impl Chirp {
    /// Longest body, in characters, accepted at the API boundary.
    pub const MAX_BODY_CHARS: usize = 140;

    /// Check a raw body against the length limit.
    ///
    /// Repositories accept bodies of any length; this is for callers that
    /// enforce the public limit before storing.
    pub fn validate_body(body: &str) -> Result<(), DomainError> {
        let len = body.chars().count();
        if len > Self::MAX_BODY_CHARS {
            return Err(DomainError::Validation(format!(
                "Chirp is too long ({len} > {} characters)",
                Self::MAX_BODY_CHARS
            )));
        }
        Ok(())
    }
}

/// Ordering of chirp listings by id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse a query value. Anything other than `"asc"` sorts newest first.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Compare two chirps in this direction.
    pub fn compare(self, a: &Chirp, b: &Chirp) -> Ordering {
        match self {
            Self::Asc => a.id.cmp(&b.id),
            Self::Desc => b.id.cmp(&a.id),
        }
    }

    /// Sort chirps in place.
    pub fn sort(self, chirps: &mut [Chirp]) {
        chirps.sort_by(|a, b| self.compare(a, b));
    }
}
