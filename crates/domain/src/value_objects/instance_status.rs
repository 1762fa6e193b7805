//! Microservice instance status value object
//!
//! The registration status a service-center registry tracks per instance.
//! The registry reports it in SCREAMING form (`UP`, `DOWN`, ...), which is
//! what `Display`/`FromStr` use.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Status of a microservice instance in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    /// Instance is registered and serving traffic
    #[default]
    Up,
    /// Instance is registered but not serving
    Down,
    /// Instance is starting up, not yet eligible
    Starting,
    /// Instance is under test, only test traffic allowed
    Testing,
    /// Instance was taken out of rotation by an operator
    OutOfService,
}

impl InstanceStatus {
    /// True only when the instance may receive normal traffic
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Registry wire form of the status
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Starting => "STARTING",
            Self::Testing => "TESTING",
            Self::OutOfService => "OUTOFSERVICE",
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

impl std::str::FromStr for InstanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            "STARTING" => Ok(Self::Starting),
            "TESTING" => Ok(Self::Testing),
            "OUTOFSERVICE" => Ok(Self::OutOfService),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}
