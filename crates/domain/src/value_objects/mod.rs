//! Value objects of the resilience core

mod circuit_key;
mod endpoint;
mod identifiers;
mod instance_status;
mod invocation_kind;
mod operation;
mod qualified_name;

pub use circuit_key::CircuitKey;
pub use endpoint::Endpoint;
pub use identifiers::{InstanceId, ServiceId};
pub use instance_status::InstanceStatus;
pub use invocation_kind::InvocationKind;
pub use operation::{OperationId, TransportName};
pub use qualified_name::QualifiedName;
