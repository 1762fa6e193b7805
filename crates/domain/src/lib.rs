//! Domain layer for microlink
//!
//! Contains the core vocabulary of the resilience pipeline: invocations,
//! microservice identity, instance status, and the caller-visible error
//! taxonomy. This layer has no async or I/O dependencies.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{DomainError, FailureKind, InvocationError, RegistryError, TransportError};
pub use value_objects::*;
