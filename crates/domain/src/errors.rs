//! Error taxonomy of the resilience core
//!
//! `TransportError` carries a `FailureKind` and preserves its cause so the
//! retry policy can classify wrapped failures by walking the source chain.
//! `InvocationError` is the single caller-visible terminal failure type.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::QualifiedName;

/// Errors raised while constructing domain values
#[derive(Debug, Error)]
pub enum DomainError {
    /// Qualified name did not satisfy `app.service.version`
    #[error("Invalid qualified name: {0}")]
    InvalidQualifiedName(String),

    /// Endpoint address was malformed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Unknown instance status wire value
    #[error("Invalid instance status: {0}")]
    InvalidStatus(String),

    /// A required value was empty
    #[error("{what} must not be empty")]
    EmptyValue { what: &'static str },
}

/// Category of a transport failure, used by retry classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Request or connect deadline exceeded
    Timeout,
    /// Remote refused the connection
    ConnectionRefused,
    /// Established connection was reset by the peer
    ConnectionReset,
    /// Other socket-level failure
    Socket,
    /// Transport-level protocol violation
    Protocol,
    /// Anything else
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::ConnectionRefused => "connection refused",
            Self::ConnectionReset => "connection reset",
            Self::Socket => "socket error",
            Self::Protocol => "protocol error",
            Self::Other => "transport error",
        };
        write!(f, "{label}")
    }
}

/// Failure raised by a transport sender for one attempt
///
/// Keeps the wrapped cause reachable through `source()` so classification
/// still works when an adapter wraps the original failure.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: FailureKind,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    /// Create a transport error of the given kind
    #[must_use]
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a timeout failure
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Timeout, message)
    }

    /// Shorthand for a connection-refused failure
    #[must_use]
    pub fn connection_refused(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ConnectionRefused, message)
    }

    /// Shorthand for a connection-reset failure
    #[must_use]
    pub fn connection_reset(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ConnectionReset, message)
    }

    /// Attach the underlying cause
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Failure category of this error
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Walk an error's cause chain and yield every `FailureKind` found
    ///
    /// Checks the error itself first, then each `source()` link, downcasting
    /// every step to `TransportError`. A foreign wrapper around a transport
    /// failure therefore still classifies by its wrapped cause, and a
    /// transport error wrapping another transport error exposes both kinds.
    pub fn kinds_in_chain<'a>(
        error: &'a (dyn StdError + 'static),
    ) -> impl Iterator<Item = FailureKind> + 'a {
        std::iter::successors(Some(error), |err| (*err).source())
            .filter_map(|err| err.downcast_ref::<Self>().map(|transport| transport.kind))
    }
}

/// Terminal failure delivered to the caller of an invocation
#[derive(Debug, Error)]
pub enum InvocationError {
    /// Synthetic failure injected by a configured fault rule; never retried
    #[error("Injected fault: status {code}")]
    InjectedFault { code: u16, payload: String },

    /// Fast failure because the breaker oracle reported the circuit open
    #[error("Circuit open for {qualified_name}: failing fast")]
    CircuitOpen { qualified_name: QualifiedName },

    /// Transport failure that was not eligible for (further) retries
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// All configured retry attempts failed
    #[error("Retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: TransportError,
    },

    /// Load balancer produced no endpoint for the target service
    #[error("No instance available for {qualified_name}")]
    NoInstanceAvailable { qualified_name: QualifiedName },

    /// Handler-chain programming error surfaced as a terminal failure
    #[error("Internal pipeline error: {0}")]
    Internal(String),
}

impl InvocationError {
    /// True for deliberately injected faults
    #[must_use]
    pub const fn is_injected_fault(&self) -> bool {
        matches!(self, Self::InjectedFault { .. })
    }

    /// True for circuit-open fast failures
    #[must_use]
    pub const fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen { .. })
    }
}

/// Failure while querying the service registry
///
/// Contained entirely inside the status sync task; never reaches callers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry request deadline exceeded
    #[error("Registry request timed out")]
    Timeout,

    /// Registry endpoint could not be reached
    #[error("Registry unavailable: {0}")]
    Unavailable(String),

    /// Registry returned a malformed response
    #[error("Registry protocol error: {0}")]
    Protocol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("adapter failed")]
    struct WrapperError {
        #[source]
        source: TransportError,
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::timeout("connect to 10.0.0.1:8080");
        assert_eq!(err.to_string(), "timeout: connect to 10.0.0.1:8080");
        assert_eq!(err.kind(), FailureKind::Timeout);
    }

    #[test]
    fn kind_found_on_error_itself() {
        let err = TransportError::connection_refused("connect");
        assert_eq!(
            TransportError::kinds_in_chain(&err).next(),
            Some(FailureKind::ConnectionRefused)
        );
    }

    #[test]
    fn kind_found_through_foreign_wrapper() {
        let wrapped = WrapperError {
            source: TransportError::timeout("read"),
        };
        assert_eq!(
            TransportError::kinds_in_chain(&wrapped).next(),
            Some(FailureKind::Timeout)
        );
    }

    #[test]
    fn every_kind_in_the_chain_is_yielded() {
        // A transport error wrapping another transport error must expose
        // the deeper kind too, not stop at the outermost one.
        let outer = TransportError::new(FailureKind::Other, "attempt failed")
            .with_source(TransportError::timeout("read"));
        let kinds: Vec<FailureKind> = TransportError::kinds_in_chain(&outer).collect();
        assert_eq!(kinds, vec![FailureKind::Other, FailureKind::Timeout]);
    }

    #[test]
    fn kind_absent_for_unrelated_error() {
        let err = std::io::Error::other("boom");
        assert_eq!(TransportError::kinds_in_chain(&err).next(), None);
    }

    #[test]
    fn invocation_error_discriminators() {
        let fault = InvocationError::InjectedFault {
            code: 503,
            payload: "injected".into(),
        };
        assert!(fault.is_injected_fault());
        assert!(!fault.is_circuit_open());

        let open = InvocationError::CircuitOpen {
            qualified_name: QualifiedName::new("shop", "cart", "1.0").unwrap(),
        };
        assert!(open.is_circuit_open());
    }

    #[test]
    fn retries_exhausted_preserves_last_cause() {
        let err = InvocationError::RetriesExhausted {
            attempts: 3,
            last: TransportError::connection_reset("send"),
        };
        assert_eq!(
            TransportError::kinds_in_chain(&err).next(),
            Some(FailureKind::ConnectionReset)
        );
    }
}
