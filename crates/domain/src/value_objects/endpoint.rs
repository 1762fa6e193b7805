//! Endpoint value object
//!
//! A resolved target address for one instance, in `scheme://host:port`
//! string form as published to the registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Address of a concrete service instance endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create an endpoint from its string form
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEndpoint` when the address is empty or
    /// carries no scheme separator.
    pub fn new(address: impl Into<String>) -> Result<Self, DomainError> {
        let address = address.into();
        if address.is_empty() {
            return Err(DomainError::InvalidEndpoint("address is empty".into()));
        }
        if !address.contains("://") {
            return Err(DomainError::InvalidEndpoint(format!(
                "'{address}' has no scheme"
            )));
        }
        Ok(Self(address))
    }

    /// The address in `scheme://host:port` form
    #[must_use]
    pub fn address(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
