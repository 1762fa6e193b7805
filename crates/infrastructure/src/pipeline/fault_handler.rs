//! Fault injection pipeline stage

use std::sync::Arc;

use async_trait::async_trait;

use application::DelaySchedule;
use domain::{Invocation, InvocationError};

use crate::fault::{CounterKey, FaultCounterStore, FaultInjector, FaultParam, FaultVerdict};

use super::handler::{Handler, Next};
use super::sink::ResponseSink;

/// Handler applying the configured fault rules before dispatch
///
/// Draws one sequence number per invocation, even when no rule fires, so
/// injection percentages stay positional across all requests.
pub struct FaultInjectionHandler {
    injector: FaultInjector,
    counters: Arc<FaultCounterStore>,
    delay: Arc<dyn DelaySchedule>,
}

impl FaultInjectionHandler {
    /// Stage over the given rules and shared counter store
    #[must_use]
    pub fn new(
        injector: FaultInjector,
        counters: Arc<FaultCounterStore>,
        delay: Arc<dyn DelaySchedule>,
    ) -> Self {
        Self {
            injector,
            counters,
            delay,
        }
    }
}

impl std::fmt::Debug for FaultInjectionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultInjectionHandler")
            .field("injector", &self.injector)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler for FaultInjectionHandler {
    fn name(&self) -> &'static str {
        "fault-injection"
    }

    async fn handle(&self, invocation: &mut Invocation, next: Next<'_>, sink: &ResponseSink) {
        let key = CounterKey::for_invocation(invocation);
        let sequence = self.counters.next_sequence(&key);
        let param = FaultParam {
            sequence,
            delay: Arc::clone(&self.delay),
        };

        match self.injector.apply(&param).await {
            FaultVerdict::Abort { code, payload } => {
                sink.complete(Err(InvocationError::InjectedFault { code, payload }));
            }
            FaultVerdict::PassThrough { .. } => next.run(invocation, sink).await,
        }
    }
}
