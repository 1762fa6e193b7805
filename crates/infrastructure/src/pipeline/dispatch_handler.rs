//! Load-balanced dispatch stage with retry
//!
//! Terminal stage of the consumer chain: selects an instance, sends the
//! invocation, and on failure applies the retry rules. Same-server retries
//! re-use the pinned endpoint up to their cap, then next-server retries
//! re-select. Circuit-tripping failures are reported to the breaker oracle
//! before the retry decision is made.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use application::{CircuitOracle, InstanceSelector, RetryRules, TransportSender};
use domain::{CircuitKey, Invocation, InvocationError, TransportError};

use super::handler::{Handler, Next};
use super::sink::ResponseSink;

/// Handler performing instance selection, dispatch, and retries
pub struct LoadBalanceHandler {
    selector: Arc<dyn InstanceSelector>,
    sender: Arc<dyn TransportSender>,
    oracle: Arc<dyn CircuitOracle>,
    rules: RetryRules,
    group: String,
}

impl LoadBalanceHandler {
    /// Terminal dispatch stage for one handler group
    #[must_use]
    pub fn new(
        selector: Arc<dyn InstanceSelector>,
        sender: Arc<dyn TransportSender>,
        oracle: Arc<dyn CircuitOracle>,
        rules: RetryRules,
        group: impl Into<String>,
    ) -> Self {
        Self {
            selector,
            sender,
            oracle,
            rules,
            group: group.into(),
        }
    }

    fn circuit_key(&self, invocation: &Invocation) -> CircuitKey {
        CircuitKey::new(
            self.group.clone(),
            invocation.qualified_name().clone(),
            invocation.operation().clone(),
        )
    }

    fn terminal_error(invocation: &Invocation, last: TransportError) -> InvocationError {
        if invocation.attempts() > 1 {
            InvocationError::RetriesExhausted {
                attempts: invocation.attempts(),
                last,
            }
        } else {
            InvocationError::Transport(last)
        }
    }
}

impl std::fmt::Debug for LoadBalanceHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadBalanceHandler")
            .field("group", &self.group)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Handler for LoadBalanceHandler {
    fn name(&self) -> &'static str {
        "load-balance"
    }

    async fn handle(&self, invocation: &mut Invocation, _next: Next<'_>, sink: &ResponseSink) {
        let Some(mut endpoint) = self.selector.select(invocation) else {
            sink.complete(Err(InvocationError::NoInstanceAvailable {
                qualified_name: invocation.qualified_name().clone(),
            }));
            return;
        };

        let mut same_used: u32 = 0;
        let mut next_used: u32 = 0;

        loop {
            invocation.record_attempt(endpoint.clone());
            debug!(
                operation = %invocation.operation(),
                endpoint = %endpoint,
                attempt = invocation.attempts(),
                "dispatching"
            );

            let error = match self.sender.send(invocation).await {
                Ok(response) => {
                    sink.complete(Ok(response));
                    return;
                }
                Err(error) => error,
            };

            if self.rules.is_circuit_tripping(&error) {
                self.oracle.record_tripping(&self.circuit_key(invocation));
            }

            if same_used < self.rules.max_same_server() && self.rules.is_retriable(&error, true) {
                same_used += 1;
                warn!(
                    endpoint = %endpoint,
                    error = %error,
                    "attempt failed, retrying on the same instance"
                );
                continue;
            }

            if next_used < self.rules.max_next_server() && self.rules.is_retriable(&error, false) {
                next_used += 1;
                // Re-select; the previous instance may no longer be eligible.
                match self.selector.select(invocation) {
                    Some(selected) => {
                        warn!(
                            endpoint = %endpoint,
                            error = %error,
                            "attempt failed, retrying on the next instance"
                        );
                        endpoint = selected;
                        continue;
                    }
                    None => {
                        sink.complete(Err(InvocationError::NoInstanceAvailable {
                            qualified_name: invocation.qualified_name().clone(),
                        }));
                        return;
                    }
                }
            }

            sink.complete(Err(Self::terminal_error(invocation, error)));
            return;
        }
    }
}
