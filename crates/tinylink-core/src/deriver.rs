use crate::token::Token;

/// Trait for deriving tokens from long URLs.
///
/// Implementations are pure functions of their input: no counters, clocks or
/// randomness, and no interaction with storage. Distinct inputs may derive
/// the same token; callers do not detect or resolve such collisions.
pub trait Deriver: Send + Sync + 'static {
    /// Derives the token for `long_url`. `long_url` is never empty.
    fn derive(&self, long_url: &str) -> Token;
}
