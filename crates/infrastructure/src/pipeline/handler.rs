//! Handler chain plumbing
//!
//! An invocation travels through an ordered list of handlers. Each handler
//! either completes the invocation through the sink or forwards to the
//! remainder of the chain via [`Next`]. The chain is fully asynchronous;
//! a handler that awaits never blocks its worker thread.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use domain::{Invocation, InvocationError};

use super::sink::{InvocationOutcome, ResponseSink};

/// One stage of the invocation pipeline
#[async_trait]
pub trait Handler: Send + Sync {
    /// Stable name used in logs
    fn name(&self) -> &'static str;

    /// Process the invocation, either completing it or forwarding it
    async fn handle(&self, invocation: &mut Invocation, next: Next<'_>, sink: &ResponseSink);
}

/// The remainder of the chain after the current handler
#[derive(Clone, Copy)]
pub struct Next<'a> {
    remaining: &'a [Arc<dyn Handler>],
}

impl Next<'_> {
    /// Run the next handler, or fail the invocation when the chain ends
    ///
    /// Falling off the end means no handler dispatched the call; that is a
    /// chain-assembly bug, surfaced as an internal error rather than a hang.
    pub async fn run(self, invocation: &mut Invocation, sink: &ResponseSink) {
        match self.remaining.split_first() {
            Some((handler, rest)) => {
                handler
                    .handle(invocation, Next { remaining: rest }, sink)
                    .await;
            }
            None => {
                error!(
                    operation = %invocation.operation(),
                    "handler chain ended without dispatch"
                );
                sink.complete(Err(InvocationError::Internal(
                    "handler chain ended without dispatch".into(),
                )));
            }
        }
    }
}

/// A named, ordered handler chain
pub struct HandlerChain {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Chain over the given handlers, run in order
    #[must_use]
    pub fn new(name: impl Into<String>, handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self {
            name: name.into(),
            handlers,
        }
    }

    /// Chain name (e.g. `consumer`)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feed an invocation into the head of the chain
    pub async fn handle(&self, invocation: &mut Invocation, sink: &ResponseSink) {
        Next {
            remaining: &self.handlers,
        }
        .run(invocation, sink)
        .await;
    }

    /// Run an invocation to its terminal outcome
    ///
    /// Convenience wrapper owning the sink plumbing. A handler returning
    /// without completing the invocation surfaces as an internal error.
    pub async fn invoke(&self, mut invocation: Invocation) -> InvocationOutcome {
        let (sink, rx) = ResponseSink::channel();
        self.handle(&mut invocation, &sink).await;
        rx.await.unwrap_or_else(|_| {
            Err(InvocationError::Internal(
                "handler returned without completing the invocation".into(),
            ))
        })
    }
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        f.debug_struct("HandlerChain")
            .field("name", &self.name)
            .field("handlers", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{InvocationKind, OperationId, QualifiedName, Response, TransportName};

    fn invocation() -> Invocation {
        Invocation::new(
            QualifiedName::new("shop", "cart", "1.0").unwrap(),
            OperationId::new("cart.checkout").unwrap(),
            TransportName::new("rest").unwrap(),
            InvocationKind::Sync,
        )
    }

    /// Completes every invocation with a fixed 200 response.
    struct Responder;

    #[async_trait]
    impl Handler for Responder {
        fn name(&self) -> &'static str {
            "responder"
        }

        async fn handle(&self, _invocation: &mut Invocation, _next: Next<'_>, sink: &ResponseSink) {
            sink.complete(Ok(Response::ok(b"ok".to_vec())));
        }
    }

    /// Forwards unconditionally.
    struct Forwarder;

    #[async_trait]
    impl Handler for Forwarder {
        fn name(&self) -> &'static str {
            "forwarder"
        }

        async fn handle(&self, invocation: &mut Invocation, next: Next<'_>, sink: &ResponseSink) {
            next.run(invocation, sink).await;
        }
    }

    #[tokio::test]
    async fn chain_runs_to_the_responder() {
        let chain = HandlerChain::new(
            "consumer",
            vec![Arc::new(Forwarder) as Arc<dyn Handler>, Arc::new(Responder)],
        );
        let outcome = chain.invoke(invocation()).await;
        assert_eq!(outcome.unwrap().status(), 200);
    }

    #[tokio::test]
    async fn empty_chain_fails_internally() {
        let chain = HandlerChain::new("consumer", Vec::new());
        let outcome = chain.invoke(invocation()).await;
        assert!(matches!(outcome, Err(InvocationError::Internal(_))));
    }

    #[tokio::test]
    async fn falling_off_the_end_fails_internally() {
        let chain = HandlerChain::new("consumer", vec![Arc::new(Forwarder) as Arc<dyn Handler>]);
        let outcome = chain.invoke(invocation()).await;
        assert!(matches!(outcome, Err(InvocationError::Internal(_))));
    }

    #[test]
    fn debug_lists_handler_names() {
        let chain = HandlerChain::new(
            "consumer",
            vec![Arc::new(Forwarder) as Arc<dyn Handler>, Arc::new(Responder)],
        );
        let debug = format!("{chain:?}");
        assert!(debug.contains("forwarder"));
        assert!(debug.contains("responder"));
    }
}
