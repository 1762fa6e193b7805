//! Circuit alarm sink port
//!
//! Alarms are a side-channel observability signal: they never gate the
//! call itself, and publishing must not block the invocation path.

use domain::{CircuitKey, QualifiedName};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Direction of a circuit transition alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmKind {
    /// Circuit transitioned to open
    Open,
    /// Circuit transitioned back to closed
    Close,
}

/// One emitted circuit transition alarm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitAlarm {
    /// Circuit the transition was observed on
    pub key: CircuitKey,
    /// Microservice the alarm is deduplicated by
    pub qualified_name: QualifiedName,
    /// Open or close
    pub kind: AlarmKind,
}

/// Port for publishing circuit alarms
#[cfg_attr(test, automock)]
pub trait AlarmSink: Send + Sync {
    /// Publish one alarm; must not block and must not fail the call path
    fn publish(&self, alarm: CircuitAlarm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::OperationId;

    #[test]
    fn trait_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn AlarmSink>();
    }

    #[test]
    fn alarm_serializes() {
        let name = QualifiedName::new("shop", "cart", "1.0").unwrap();
        let alarm = CircuitAlarm {
            key: CircuitKey::new(
                "consumer",
                name.clone(),
                OperationId::new("cart.checkout").unwrap(),
            ),
            qualified_name: name,
            kind: AlarmKind::Open,
        };
        let json = serde_json::to_string(&alarm).unwrap();
        assert!(json.contains("open"));
    }
}
