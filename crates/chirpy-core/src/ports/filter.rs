//! Content filtering port.

/// Rewrites a chirp body before it is stored. Must be pure and total.
pub trait BodyFilter: Send + Sync {
    fn filter(&self, body: &str) -> String;
}
