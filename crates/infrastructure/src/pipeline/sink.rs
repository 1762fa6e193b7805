//! Single-shot response delivery

use parking_lot::Mutex;
use tokio::sync::oneshot;

use domain::{InvocationError, Response};

/// Terminal outcome of one invocation
pub type InvocationOutcome = Result<Response, InvocationError>;

/// Write side of an invocation's single-shot outcome channel
///
/// Exactly one handler completes each invocation. A second completion is
/// a handler-chain programming error and panics rather than silently
/// dropping one of the two outcomes.
#[derive(Debug)]
pub struct ResponseSink {
    tx: Mutex<Option<oneshot::Sender<InvocationOutcome>>>,
}

impl ResponseSink {
    /// Create a sink plus the receiver for its one outcome
    #[must_use]
    pub fn channel() -> (Self, oneshot::Receiver<InvocationOutcome>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Deliver the terminal outcome
    ///
    /// # Panics
    ///
    /// Panics when the invocation was already completed.
    #[allow(clippy::panic)]
    pub fn complete(&self, outcome: InvocationOutcome) {
        let Some(tx) = self.tx.lock().take() else {
            panic!("invocation completed twice");
        };
        // The caller may have stopped waiting; that is not an error here.
        let _ = tx.send(outcome);
    }

    /// Whether an outcome was already delivered
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.tx.lock().is_none()
    }
}
