//! In-process broadcast events
//!
//! Fan-out channel for lifecycle and alarm events. Publishing never
//! blocks and never fails the publisher: with no subscribers the event is
//! simply dropped, and slow subscribers lag instead of backpressuring.

use tokio::sync::broadcast;

use application::{AlarmSink, CircuitAlarm};

/// Broadcast channel for one event type
#[derive(Debug)]
pub struct EventChannel<T: Clone> {
    tx: broadcast::Sender<T>,
}

impl<T: Clone> EventChannel<T> {
    /// Channel retaining up to `capacity` undelivered events per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers
    pub fn publish(&self, event: T) {
        // No subscribers is fine; the event just goes nowhere.
        let _ = self.tx.send(event);
    }

    /// Subscribe to events published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone> Clone for EventChannel<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Alarm sink that fans circuit alarms out over a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastAlarmSink {
    channel: EventChannel<CircuitAlarm>,
}

impl BroadcastAlarmSink {
    /// Sink publishing into the given channel
    #[must_use]
    pub const fn new(channel: EventChannel<CircuitAlarm>) -> Self {
        Self { channel }
    }

    /// The underlying channel, for subscribing
    #[must_use]
    pub const fn channel(&self) -> &EventChannel<CircuitAlarm> {
        &self.channel
    }
}

impl AlarmSink for BroadcastAlarmSink {
    fn publish(&self, alarm: CircuitAlarm) {
        self.channel.publish(alarm);
    }
}
