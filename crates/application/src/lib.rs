//! Application layer - ports and the retry decision policy
//!
//! Defines the capability interfaces the resilience pipeline consumes
//! (breaker oracle, load balancer, registry client, transport sender,
//! alarm sink, delay scheduling) and the pure retry classification policy.
//! Implementations live in the infrastructure layer.

pub mod ports;
pub mod retry;

pub use ports::*;
pub use retry::RetryRules;
