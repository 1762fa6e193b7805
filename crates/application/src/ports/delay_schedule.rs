//! Delay scheduling port
//!
//! Injected delays must suspend only the logical call path. On a
//! cooperative event-loop runtime the wait is a scheduled timer resumption,
//! never a blocking sleep; the capability is passed in explicitly instead
//! of being detected from ambient thread state.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Port for scheduling an injected delay on the caller's execution context
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DelaySchedule: Send + Sync {
    /// Suspend the current call path for `duration`
    async fn delay(&self, duration: Duration);
}
