//! Domain entities

mod invocation;
mod microservice;
mod response;

pub use invocation::Invocation;
pub use microservice::{InstanceRecord, Microservice};
pub use response::Response;
