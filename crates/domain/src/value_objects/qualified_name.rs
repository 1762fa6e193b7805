//! Microservice qualified name value object
//!
//! Uniquely identifies a microservice as `app.service.version`. Used as
//! the key for circuit alarm markers and registration-event matching.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Fully qualified microservice name (`app.service.version`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    app: String,
    service: String,
    version: String,
}

impl QualifiedName {
    /// Create a qualified name from its three components
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQualifiedName` if any component is
    /// empty, or if the app or service component contains the `.`
    /// separator.
    pub fn new(
        app: impl Into<String>,
        service: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let app = app.into();
        let service = service.into();
        let version = version.into();

        for (label, part) in [("app", &app), ("service", &service), ("version", &version)] {
            if part.is_empty() {
                return Err(DomainError::InvalidQualifiedName(format!(
                    "{label} component is empty"
                )));
            }
        }
        // version may carry dots ("1.0.2"); app and service must not, or the
        // string form would be ambiguous
        for (label, part) in [("app", &app), ("service", &service)] {
            if part.contains('.') {
                return Err(DomainError::InvalidQualifiedName(format!(
                    "{label} component '{part}' contains '.'"
                )));
            }
        }

        Ok(Self {
            app,
            service,
            version,
        })
    }

    /// Application the service belongs to
    #[must_use]
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Service name within the application
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Service version
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.app, self.service, self.version)
    }
}

impl std::str::FromStr for QualifiedName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(app), Some(service), Some(version)) => Self::new(app, service, version),
            _ => Err(DomainError::InvalidQualifiedName(format!(
                "expected app.service.version, got '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_components() {
        let name = QualifiedName::new("shop", "cart", "1.0").unwrap();
        assert_eq!(name.app(), "shop");
        assert_eq!(name.service(), "cart");
        assert_eq!(name.version(), "1.0");
    }

    #[test]
    fn display_joins_with_dots() {
        let name = QualifiedName::new("shop", "cart", "1.0").unwrap();
        assert_eq!(name.to_string(), "shop.cart.1.0");
    }

    #[test]
    fn rejects_empty_component() {
        assert!(QualifiedName::new("", "cart", "1").is_err());
        assert!(QualifiedName::new("shop", "", "1").is_err());
        assert!(QualifiedName::new("shop", "cart", "").is_err());
    }

    #[test]
    fn rejects_separator_in_component() {
        assert!(QualifiedName::new("sh.op", "cart", "1").is_err());
    }

    #[test]
    fn parses_from_str() {
        let name: QualifiedName = "shop.cart.1.2".parse().unwrap();
        assert_eq!(name.app(), "shop");
        assert_eq!(name.version(), "1.2");
    }

    #[test]
    fn parse_rejects_missing_parts() {
        assert!("shop.cart".parse::<QualifiedName>().is_err());
        assert!("shop".parse::<QualifiedName>().is_err());
    }

    #[test]
    fn equality_and_hash_by_value() {
        use std::collections::HashSet;

        let a = QualifiedName::new("shop", "cart", "1").unwrap();
        let b = QualifiedName::new("shop", "cart", "1").unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
