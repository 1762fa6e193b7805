//! Circuit breaker pipeline stage

use std::sync::Arc;

use async_trait::async_trait;

use domain::{Invocation, InvocationError};

use crate::circuit::CircuitWatcher;

use super::handler::{Handler, Next};
use super::sink::ResponseSink;

/// Handler failing fast when the breaker oracle reports the circuit open
pub struct CircuitBreakerHandler {
    watcher: Arc<CircuitWatcher>,
}

impl CircuitBreakerHandler {
    /// Stage over a shared circuit watcher
    #[must_use]
    pub fn new(watcher: Arc<CircuitWatcher>) -> Self {
        Self { watcher }
    }
}

impl std::fmt::Debug for CircuitBreakerHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreakerHandler")
            .field("watcher", &self.watcher)
            .finish()
    }
}

#[async_trait]
impl Handler for CircuitBreakerHandler {
    fn name(&self) -> &'static str {
        "circuit-breaker"
    }

    async fn handle(&self, invocation: &mut Invocation, next: Next<'_>, sink: &ResponseSink) {
        if self.watcher.observe(invocation) {
            sink.complete(Err(InvocationError::CircuitOpen {
                qualified_name: invocation.qualified_name().clone(),
            }));
            return;
        }
        next.run(invocation, sink).await;
    }
}
