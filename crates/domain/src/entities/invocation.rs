//! Invocation entity
//!
//! One outbound remote call and its metadata. An invocation is owned by a
//! single call path: it is moved through the handler chain, mutated only by
//! the dispatch handler (endpoint + attempt counter), and dropped when the
//! terminal outcome is delivered.

use crate::value_objects::{
    Endpoint, InvocationKind, OperationId, QualifiedName, TransportName,
};

/// One outbound remote call
#[derive(Debug, Clone)]
pub struct Invocation {
    qualified_name: QualifiedName,
    operation: OperationId,
    transport: TransportName,
    kind: InvocationKind,
    endpoint: Option<Endpoint>,
    attempts: u32,
}

impl Invocation {
    /// Create an invocation; the endpoint stays unresolved until dispatch
    #[must_use]
    pub const fn new(
        qualified_name: QualifiedName,
        operation: OperationId,
        transport: TransportName,
        kind: InvocationKind,
    ) -> Self {
        Self {
            qualified_name,
            operation,
            transport,
            kind,
            endpoint: None,
            attempts: 0,
        }
    }

    /// Target microservice
    #[must_use]
    pub const fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// Target operation
    #[must_use]
    pub const fn operation(&self) -> &OperationId {
        &self.operation
    }

    /// Transport this call travels over
    #[must_use]
    pub const fn transport(&self) -> &TransportName {
        &self.transport
    }

    /// Sync or async consumption
    #[must_use]
    pub const fn kind(&self) -> InvocationKind {
        self.kind
    }

    /// Endpoint chosen by the dispatch handler, if any attempt was made
    #[must_use]
    pub const fn endpoint(&self) -> Option<&Endpoint> {
        self.endpoint.as_ref()
    }

    /// Number of dispatch attempts made so far
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record one dispatch attempt against the given endpoint
    pub fn record_attempt(&mut self, endpoint: Endpoint) {
        self.endpoint = Some(endpoint);
        self.attempts += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation() -> Invocation {
        Invocation::new(
            QualifiedName::new("shop", "cart", "1.0").unwrap(),
            OperationId::new("cart.checkout").unwrap(),
            TransportName::new("rest").unwrap(),
            InvocationKind::Sync,
        )
    }

    #[test]
    fn starts_unresolved() {
        let inv = invocation();
        assert!(inv.endpoint().is_none());
        assert_eq!(inv.attempts(), 0);
    }

    #[test]
    fn record_attempt_pins_endpoint_and_counts() {
        let mut inv = invocation();
        let first = Endpoint::new("rest://10.0.0.1:8080").unwrap();
        let second = Endpoint::new("rest://10.0.0.2:8080").unwrap();

        inv.record_attempt(first.clone());
        assert_eq!(inv.endpoint(), Some(&first));
        assert_eq!(inv.attempts(), 1);

        inv.record_attempt(second.clone());
        assert_eq!(inv.endpoint(), Some(&second));
        assert_eq!(inv.attempts(), 2);
    }
}
