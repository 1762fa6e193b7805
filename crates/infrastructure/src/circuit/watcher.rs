//! Circuit state watcher
//!
//! Consults the breaker oracle per invocation and turns state transitions
//! into deduplicated alarms: one `Open` alarm per microservice while its
//! circuit stays open, one `Close` alarm when it recovers. Dedup is keyed
//! by qualified name, so many operations of one service share a marker.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use application::{AlarmKind, AlarmSink, CircuitAlarm, CircuitOracle};
use domain::{CircuitKey, Invocation, QualifiedName};

/// Watches circuit state and emits deduplicated open/close alarms
pub struct CircuitWatcher {
    group: String,
    oracle: Arc<dyn CircuitOracle>,
    alarms: Arc<dyn AlarmSink>,
    markers: Mutex<HashSet<QualifiedName>>,
}

impl CircuitWatcher {
    /// Watcher for one handler group
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        oracle: Arc<dyn CircuitOracle>,
        alarms: Arc<dyn AlarmSink>,
    ) -> Self {
        Self {
            group: group.into(),
            oracle,
            alarms,
            markers: Mutex::new(HashSet::new()),
        }
    }

    /// Circuit key for this invocation within the watcher's group
    #[must_use]
    pub fn circuit_key(&self, invocation: &Invocation) -> CircuitKey {
        CircuitKey::new(
            self.group.clone(),
            invocation.qualified_name().clone(),
            invocation.operation().clone(),
        )
    }

    /// Observe the circuit for this invocation
    ///
    /// Returns whether the circuit is open. An unavailable oracle answer
    /// lets the call through and leaves alarm state untouched: only a real
    /// closed observation may clear an open marker, so a transient oracle
    /// outage cannot fake a Close/Open alarm pair. Alarm emission happens
    /// on state edges only: an open circuit already marked, or a closed
    /// circuit never marked, emits nothing.
    pub fn observe(&self, invocation: &Invocation) -> bool {
        let key = self.circuit_key(invocation);
        let Some(open) = self.oracle.is_open(&key) else {
            return false;
        };
        let name = invocation.qualified_name();

        let mut markers = self.markers.lock();
        if open {
            if markers.insert(name.clone()) {
                warn!(circuit = %key, "circuit opened, failing fast");
                self.alarms.publish(CircuitAlarm {
                    key,
                    qualified_name: name.clone(),
                    kind: AlarmKind::Open,
                });
            }
        } else if markers.remove(name) {
            info!(circuit = %key, "circuit closed, traffic restored");
            self.alarms.publish(CircuitAlarm {
                key,
                qualified_name: name.clone(),
                kind: AlarmKind::Close,
            });
        }
        open
    }

    /// Forget all open markers
    ///
    /// Called on pipeline shutdown so a restarted pipeline re-announces
    /// circuits that are still open.
    pub fn clear(&self) {
        self.markers.lock().clear();
    }

    /// Whether an open alarm is currently outstanding for `name`
    #[must_use]
    pub fn is_marked(&self, name: &QualifiedName) -> bool {
        self.markers.lock().contains(name)
    }
}

impl fmt::Debug for CircuitWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitWatcher")
            .field("group", &self.group)
            .field("markers", &*self.markers.lock())
            .finish_non_exhaustive()
    }
}
