//! Asynchronous invocation pipeline
//!
//! The consumer chain runs fault injection, then the circuit breaker,
//! then load-balanced dispatch with retry. Handlers communicate a single
//! terminal outcome per invocation through the response sink.

mod circuit_handler;
mod dispatch_handler;
mod fault_handler;
mod handler;
mod sink;

use std::sync::Arc;

use application::{
    AlarmSink, CircuitOracle, DelaySchedule, InstanceSelector, RetryRules, TransportSender,
};

pub use circuit_handler::CircuitBreakerHandler;
pub use dispatch_handler::LoadBalanceHandler;
pub use fault_handler::FaultInjectionHandler;
pub use handler::{Handler, HandlerChain, Next};
pub use sink::{InvocationOutcome, ResponseSink};

use crate::circuit::CircuitWatcher;
use crate::fault::{FaultCounterStore, FaultInjector, FaultRule};

/// Name of the consumer-side handler group
pub const CONSUMER_GROUP: &str = "consumer";

/// Ports the consumer chain plugs into
pub struct ConsumerChainParts {
    /// Load-balancing rule
    pub selector: Arc<dyn InstanceSelector>,
    /// Underlying transport
    pub sender: Arc<dyn TransportSender>,
    /// Breaker oracle
    pub oracle: Arc<dyn CircuitOracle>,
    /// Alarm publisher
    pub alarms: Arc<dyn AlarmSink>,
    /// Delay capability for injected delays
    pub delay: Arc<dyn DelaySchedule>,
}

impl std::fmt::Debug for ConsumerChainParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumerChainParts").finish_non_exhaustive()
    }
}

/// Assemble the standard consumer chain
///
/// Stage order is fixed: fault injection runs before the breaker check so
/// injected aborts never trip circuits, and dispatch is always terminal.
#[must_use]
pub fn build_consumer_chain(
    fault_rules: Vec<FaultRule>,
    retry_rules: RetryRules,
    parts: ConsumerChainParts,
) -> HandlerChain {
    let watcher = Arc::new(CircuitWatcher::new(
        CONSUMER_GROUP,
        Arc::clone(&parts.oracle),
        parts.alarms,
    ));
    HandlerChain::new(
        CONSUMER_GROUP,
        vec![
            Arc::new(FaultInjectionHandler::new(
                FaultInjector::new(fault_rules),
                Arc::new(FaultCounterStore::new()),
                parts.delay,
            )) as Arc<dyn Handler>,
            Arc::new(CircuitBreakerHandler::new(watcher)),
            Arc::new(LoadBalanceHandler::new(
                parts.selector,
                parts.sender,
                parts.oracle,
                retry_rules,
                CONSUMER_GROUP,
            )),
        ],
    )
}
