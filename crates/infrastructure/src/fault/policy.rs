//! Fault rule configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// What a fault rule does when it fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FaultAction {
    /// Hold the call path for a fixed duration, then continue
    Delay { duration_ms: u64 },
    /// Terminate the call with a synthetic error response
    Abort { error_code: u16, payload: String },
}

/// One configured fault rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRule {
    #[serde(flatten)]
    action: FaultAction,
    /// Percentage of requests the rule fires on, 0 to 100
    percentage: u8,
}

impl FaultRule {
    /// Rule that delays `percentage`% of requests by `duration`
    #[must_use]
    pub const fn delay(duration: Duration, percentage: u8) -> Self {
        Self {
            action: FaultAction::Delay {
                duration_ms: duration.as_millis() as u64,
            },
            percentage,
        }
    }

    /// Rule that aborts `percentage`% of requests with the given code
    #[must_use]
    pub fn abort(error_code: u16, payload: impl Into<String>, percentage: u8) -> Self {
        Self {
            action: FaultAction::Abort {
                error_code,
                payload: payload.into(),
            },
            percentage,
        }
    }

    /// The configured action
    #[must_use]
    pub const fn action(&self) -> &FaultAction {
        &self.action
    }

    /// The configured injection percentage
    #[must_use]
    pub const fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Whether this rule fires for the given request sequence number
    ///
    /// Position-based: the first `percentage` slots of every 100-request
    /// window fire, the rest pass.
    #[must_use]
    pub fn matches(&self, sequence: u64) -> bool {
        sequence % 100 < u64::from(self.percentage)
    }

    /// Reject rules that can never behave sensibly
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFaultRule` for a percentage above 100
    /// or a zero-length delay.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.percentage > 100 {
            return Err(ConfigError::InvalidFaultRule(format!(
                "percentage {} exceeds 100",
                self.percentage
            )));
        }
        if let FaultAction::Delay { duration_ms: 0 } = self.action {
            return Err(ConfigError::InvalidFaultRule(
                "delay duration must be positive".into(),
            ));
        }
        Ok(())
    }
}
