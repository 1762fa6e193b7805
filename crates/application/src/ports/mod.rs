//! Capability ports consumed by the resilience pipeline

mod alarm_sink;
mod circuit_oracle;
mod delay_schedule;
mod instance_selector;
mod registry_client;
mod transport_sender;

pub use alarm_sink::{AlarmKind, AlarmSink, CircuitAlarm};
pub use circuit_oracle::CircuitOracle;
pub use delay_schedule::DelaySchedule;
pub use instance_selector::InstanceSelector;
pub use registry_client::RegistryClient;
pub use transport_sender::TransportSender;
