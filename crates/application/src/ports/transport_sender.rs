//! Transport sender port

use async_trait::async_trait;
use domain::{Invocation, Response, TransportError};
#[cfg(test)]
use mockall::automock;

/// Port for the underlying transport implementation
///
/// One `send` is one attempt against the invocation's pinned endpoint;
/// the future resolves exactly once.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransportSender: Send + Sync {
    /// Send the invocation to its resolved endpoint
    async fn send(&self, invocation: &Invocation) -> Result<Response, TransportError>;
}
