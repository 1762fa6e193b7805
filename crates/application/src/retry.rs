//! Retry classification policy
//!
//! A pure decision component: it classifies a failed attempt into
//! "retry on the same server", "retry on the next server", or "give up",
//! and flags circuit-tripping failures for the breaker oracle. It carries
//! no attempt counters; the dispatch handler enforces the caps.

use std::error::Error as StdError;

use domain::{FailureKind, TransportError};

/// Default categories eligible for a same-server retry
const DEFAULT_RETRY_ON_SAME: [FailureKind; 2] =
    [FailureKind::Timeout, FailureKind::ConnectionRefused];

/// Default categories counted against the circuit by the breaker oracle
const DEFAULT_CIRCUIT_TRIPPING: [FailureKind; 3] = [
    FailureKind::Socket,
    FailureKind::Timeout,
    FailureKind::ConnectionReset,
];

/// Retry limits plus failure classification sets
///
/// Configured before the handler chain starts and shared immutably
/// afterwards; the mutation API is for construction-time tuning only.
#[derive(Debug, Clone)]
pub struct RetryRules {
    retry_enabled: bool,
    max_same_server: u32,
    max_next_server: u32,
    retry_on_same: Vec<FailureKind>,
    circuit_tripping: Vec<FailureKind>,
}

impl RetryRules {
    /// Create rules with the default classification sets
    #[must_use]
    pub fn new(retry_enabled: bool, max_same_server: u32, max_next_server: u32) -> Self {
        Self {
            retry_enabled,
            max_same_server,
            max_next_server,
            retry_on_same: DEFAULT_RETRY_ON_SAME.to_vec(),
            circuit_tripping: DEFAULT_CIRCUIT_TRIPPING.to_vec(),
        }
    }

    /// Rules with retries switched off entirely
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(false, 0, 0)
    }

    /// Maximum extra attempts against the already-chosen instance
    #[must_use]
    pub const fn max_same_server(&self) -> u32 {
        self.max_same_server
    }

    /// Maximum extra attempts against freshly selected instances
    #[must_use]
    pub const fn max_next_server(&self) -> u32 {
        self.max_next_server
    }

    /// Master retry switch
    #[must_use]
    pub const fn retry_enabled(&self) -> bool {
        self.retry_enabled
    }

    /// Whether a failed attempt may be retried
    ///
    /// Same-server attempts are retriable only when a configured
    /// same-server category appears anywhere in the failure's cause chain;
    /// next-server attempts only need retries to be enabled.
    #[must_use]
    pub fn is_retriable(&self, error: &(dyn StdError + 'static), same_server: bool) -> bool {
        self.retry_enabled && (!same_server || self.chain_matches(error, &self.retry_on_same))
    }

    /// Whether this failure should be counted against the circuit
    #[must_use]
    pub fn is_circuit_tripping(&self, error: &(dyn StdError + 'static)) -> bool {
        self.chain_matches(error, &self.circuit_tripping)
    }

    /// Add a category to the same-server retry set
    pub fn allow_retry_on_same(&mut self, kind: FailureKind) {
        if !self.retry_on_same.contains(&kind) {
            self.retry_on_same.push(kind);
        }
    }

    /// Remove a category from the same-server retry set
    ///
    /// Returns `false` when the category was not configured.
    pub fn remove_retry_on_same(&mut self, kind: FailureKind) -> bool {
        let before = self.retry_on_same.len();
        self.retry_on_same.retain(|k| *k != kind);
        self.retry_on_same.len() != before
    }

    /// Add a category to the circuit-tripping set
    pub fn allow_circuit_tripping(&mut self, kind: FailureKind) {
        if !self.circuit_tripping.contains(&kind) {
            self.circuit_tripping.push(kind);
        }
    }

    /// Remove a category from the circuit-tripping set
    ///
    /// Returns `false` when the category was not configured.
    pub fn remove_circuit_tripping(&mut self, kind: FailureKind) -> bool {
        let before = self.circuit_tripping.len();
        self.circuit_tripping.retain(|k| *k != kind);
        self.circuit_tripping.len() != before
    }

    fn chain_matches(&self, error: &(dyn StdError + 'static), kinds: &[FailureKind]) -> bool {
        // Any kind anywhere in the cause chain counts; an outer non-matching
        // transport error must not mask a matching deeper cause.
        TransportError::kinds_in_chain(error).any(|kind| kinds.contains(&kind))
    }
}

impl Default for RetryRules {
    fn default() -> Self {
        Self::new(true, 1, 1)
    }
}
