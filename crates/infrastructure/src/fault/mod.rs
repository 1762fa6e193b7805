//! Consumer-side fault injection
//!
//! Deterministic, counter-driven fault rules: every request to an
//! operation draws a sequence number from a per-(transport, operation)
//! counter, and each rule fires when `sequence % 100` falls below its
//! configured percentage. No randomness, so injection rates are exact
//! over any window of 100 requests.

mod counter;
mod delay;
mod injector;
mod policy;

pub use counter::{CounterKey, FaultCounterStore};
pub use delay::TokioDelay;
pub use injector::{FaultInjector, FaultParam, FaultVerdict};
pub use policy::{FaultAction, FaultRule};
