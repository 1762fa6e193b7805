//! Circuit breaker oracle port
//!
//! The open/half-open/closed timing math lives outside this crate; the
//! pipeline only asks "is this circuit open" and reports circuit-tripping
//! failures back.

use domain::CircuitKey;
#[cfg(test)]
use mockall::automock;

/// Port for the opaque circuit-breaker oracle
#[cfg_attr(test, automock)]
pub trait CircuitOracle: Send + Sync {
    /// Whether the circuit for `key` is currently open
    ///
    /// `None` means the oracle has no answer for this key (unavailable);
    /// callers must treat that as "not open" and never block the call on it.
    fn is_open(&self, key: &CircuitKey) -> Option<bool>;

    /// Report a failure the retry policy classified as circuit-tripping
    ///
    /// Feeds the oracle's own accounting; it does not open the circuit here.
    fn record_tripping(&self, _key: &CircuitKey) {}
}
