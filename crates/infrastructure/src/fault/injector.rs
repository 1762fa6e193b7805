//! Fault rule evaluation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use application::DelaySchedule;

use super::policy::{FaultAction, FaultRule};

/// Per-request inputs to fault evaluation
#[derive(Clone)]
pub struct FaultParam {
    /// Sequence number drawn for this request
    pub sequence: u64,
    /// Capability used to realize injected delays
    pub delay: Arc<dyn DelaySchedule>,
}

impl fmt::Debug for FaultParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultParam")
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// Outcome of evaluating all configured rules against one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultVerdict {
    /// An abort rule fired; terminate the call with this synthetic error
    Abort { code: u16, payload: String },
    /// No abort fired; `delayed` reports any injected delay already served
    PassThrough { delayed: Option<Duration> },
}

/// Ordered evaluator over the configured fault rules
///
/// Rules are checked in configuration order. A matching delay rule is
/// served immediately and evaluation continues; the first matching abort
/// rule terminates evaluation.
#[derive(Debug, Clone, Default)]
pub struct FaultInjector {
    rules: Vec<FaultRule>,
}

impl FaultInjector {
    /// Injector over the given rules, kept in order
    #[must_use]
    pub fn new(rules: Vec<FaultRule>) -> Self {
        Self { rules }
    }

    /// Whether any rules are configured at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule against this request
    pub async fn apply(&self, param: &FaultParam) -> FaultVerdict {
        let mut delayed: Option<Duration> = None;

        for rule in &self.rules {
            if !rule.matches(param.sequence) {
                continue;
            }
            match rule.action() {
                FaultAction::Delay { duration_ms } => {
                    let duration = Duration::from_millis(*duration_ms);
                    debug!(sequence = param.sequence, ?duration, "injecting delay");
                    param.delay.delay(duration).await;
                    delayed = Some(delayed.unwrap_or_default() + duration);
                }
                FaultAction::Abort { error_code, payload } => {
                    debug!(sequence = param.sequence, code = error_code, "injecting abort");
                    return FaultVerdict::Abort {
                        code: *error_code,
                        payload: payload.clone(),
                    };
                }
            }
        }

        FaultVerdict::PassThrough { delayed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Records requested delays instead of sleeping.
    #[derive(Default)]
    struct RecordingDelay {
        requested: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl DelaySchedule for RecordingDelay {
        async fn delay(&self, duration: Duration) {
            self.requested.lock().push(duration);
        }
    }

    fn param(sequence: u64, delay: &Arc<RecordingDelay>) -> FaultParam {
        FaultParam {
            sequence,
            delay: Arc::clone(delay) as Arc<dyn DelaySchedule>,
        }
    }

    #[tokio::test]
    async fn no_rules_pass_through() {
        let injector = FaultInjector::default();
        let delay = Arc::new(RecordingDelay::default());
        let verdict = injector.apply(&param(0, &delay)).await;
        assert_eq!(verdict, FaultVerdict::PassThrough { delayed: None });
        assert!(injector.is_empty());
    }

    #[tokio::test]
    async fn matching_abort_terminates() {
        let injector = FaultInjector::new(vec![FaultRule::abort(421, "injected", 50)]);
        let delay = Arc::new(RecordingDelay::default());

        let verdict = injector.apply(&param(49, &delay)).await;
        assert_eq!(
            verdict,
            FaultVerdict::Abort {
                code: 421,
                payload: "injected".into()
            }
        );

        let verdict = injector.apply(&param(50, &delay)).await;
        assert_eq!(verdict, FaultVerdict::PassThrough { delayed: None });
    }

    #[tokio::test]
    async fn matching_delay_is_served_then_evaluation_continues() {
        let injector = FaultInjector::new(vec![
            FaultRule::delay(Duration::from_millis(20), 100),
            FaultRule::abort(503, "after delay", 100),
        ]);
        let delay = Arc::new(RecordingDelay::default());

        let verdict = injector.apply(&param(7, &delay)).await;
        assert_eq!(
            verdict,
            FaultVerdict::Abort {
                code: 503,
                payload: "after delay".into()
            }
        );
        assert_eq!(*delay.requested.lock(), vec![Duration::from_millis(20)]);
    }

    #[tokio::test]
    async fn multiple_delays_accumulate() {
        let injector = FaultInjector::new(vec![
            FaultRule::delay(Duration::from_millis(10), 100),
            FaultRule::delay(Duration::from_millis(15), 100),
        ]);
        let delay = Arc::new(RecordingDelay::default());

        let verdict = injector.apply(&param(0, &delay)).await;
        assert_eq!(
            verdict,
            FaultVerdict::PassThrough {
                delayed: Some(Duration::from_millis(25))
            }
        );
        assert_eq!(delay.requested.lock().len(), 2);
    }

    #[tokio::test]
    async fn non_matching_delay_is_skipped() {
        let injector = FaultInjector::new(vec![FaultRule::delay(Duration::from_millis(10), 30)]);
        let delay = Arc::new(RecordingDelay::default());

        let verdict = injector.apply(&param(30, &delay)).await;
        assert_eq!(verdict, FaultVerdict::PassThrough { delayed: None });
        assert!(delay.requested.lock().is_empty());
    }
}
