//! Registry-assigned identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Registry-assigned id of a microservice
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceId(String);

impl ServiceId {
    /// Create a service id
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyValue` for an empty id.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyValue { what: "service id" });
        }
        Ok(Self(id))
    }

    /// The raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry-assigned id of one microservice instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(String);

impl InstanceId {
    /// Create an instance id
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyValue` for an empty id.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyValue { what: "instance id" });
        }
        Ok(Self(id))
    }

    /// The raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_id_round_trip() {
        let id = ServiceId::new("svc-123").unwrap();
        assert_eq!(id.as_str(), "svc-123");
        assert_eq!(id.to_string(), "svc-123");
    }

    #[test]
    fn ids_reject_empty() {
        assert!(ServiceId::new("").is_err());
        assert!(InstanceId::new("").is_err());
    }
}
