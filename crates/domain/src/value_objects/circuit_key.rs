//! Circuit key value object
//!
//! Identity of one circuit: the handler group it belongs to plus the
//! microservice operation it protects. The `Display` form is the stable
//! key handed to the breaker oracle.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{OperationId, QualifiedName};

/// Key identifying one circuit in the breaker oracle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitKey {
    group: String,
    qualified_name: QualifiedName,
    operation: OperationId,
}

impl CircuitKey {
    /// Build a circuit key for an operation within a handler group
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        qualified_name: QualifiedName,
        operation: OperationId,
    ) -> Self {
        Self {
            group: group.into(),
            qualified_name,
            operation,
        }
    }

    /// Handler group name (e.g. `consumer`)
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Microservice the circuit protects
    #[must_use]
    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// Operation the circuit protects
    #[must_use]
    pub fn operation(&self) -> &OperationId {
        &self.operation
    }
}

impl fmt::Display for CircuitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.group, self.qualified_name, self.operation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CircuitKey {
        CircuitKey::new(
            "consumer",
            QualifiedName::new("shop", "cart", "1.0").unwrap(),
            OperationId::new("cart.checkout").unwrap(),
        )
    }

    #[test]
    fn display_is_stable() {
        assert_eq!(key().to_string(), "consumer/shop.cart.1.0/cart.checkout");
    }

    #[test]
    fn accessors() {
        let k = key();
        assert_eq!(k.group(), "consumer");
        assert_eq!(k.operation().as_str(), "cart.checkout");
    }
}
