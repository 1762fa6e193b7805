//! Tokio-backed delay schedule

use std::time::Duration;

use async_trait::async_trait;

use application::DelaySchedule;

/// `DelaySchedule` backed by the tokio timer wheel
///
/// Suspends only the calling task; the worker thread stays free to drive
/// other invocations while the timer is pending.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl DelaySchedule for TokioDelay {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn delay_uses_the_timer_not_the_thread() {
        let started = tokio::time::Instant::now();
        TokioDelay.delay(Duration::from_secs(5)).await;
        // Paused time advances instantly, which only works for timer waits.
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }
}
