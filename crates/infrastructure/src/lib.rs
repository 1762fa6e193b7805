//! Infrastructure layer - the resilience pipeline and its adapters
//!
//! Implements the ports defined in the application layer: fault injection,
//! circuit-open alarming, the handler chain with load-balanced dispatch and
//! retry, the registry status sync task, the broadcast event channel, and
//! configuration loading.

pub mod circuit;
pub mod config;
pub mod events;
pub mod fault;
pub mod pipeline;
pub mod registry;
pub mod telemetry;

pub use circuit::CircuitWatcher;
pub use config::{ConfigError, ResilienceConfig, RetryConfig};
pub use events::{BroadcastAlarmSink, EventChannel};
pub use fault::{
    CounterKey, FaultAction, FaultCounterStore, FaultInjector, FaultParam, FaultRule,
    FaultVerdict, TokioDelay,
};
pub use pipeline::{
    CONSUMER_GROUP, CircuitBreakerHandler, ConsumerChainParts, FaultInjectionHandler, Handler,
    HandlerChain, InvocationOutcome, LoadBalanceHandler, Next, ResponseSink,
    build_consumer_chain,
};
pub use registry::{LocalInstance, RegistrationEvent, StatusSyncTask, TaskStatus};
pub use telemetry::init_telemetry;
