//! Per-operation request counters
//!
//! One atomic counter per (transport, operation) pair, shared by every
//! fault rule targeting that operation so all rules see the same sequence
//! number for a given request.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use domain::Invocation;

/// Key of one fault counter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey {
    transport: String,
    operation: String,
}

impl CounterKey {
    /// Key for an explicit transport/operation pair
    #[must_use]
    pub fn new(transport: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            transport: transport.into(),
            operation: operation.into(),
        }
    }

    /// Key identifying the invocation's target operation
    #[must_use]
    pub fn for_invocation(invocation: &Invocation) -> Self {
        Self::new(
            invocation.transport().as_str(),
            invocation.operation().as_str(),
        )
    }
}

/// Store of per-operation fault counters
///
/// Counters are created on first use and never removed; the set of
/// operations a process calls is bounded by its contract surface.
#[derive(Debug, Default)]
pub struct FaultCounterStore {
    counters: RwLock<HashMap<CounterKey, Arc<AtomicU64>>>,
}

impl FaultCounterStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next sequence number for `key`
    ///
    /// Returns the counter value before the increment, so the first
    /// request observes sequence 0.
    pub fn next_sequence(&self, key: &CounterKey) -> u64 {
        self.counter(key).fetch_add(1, Ordering::SeqCst)
    }

    /// Current counter value without advancing it
    #[must_use]
    pub fn current(&self, key: &CounterKey) -> u64 {
        self.counters
            .read()
            .get(key)
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }

    /// Set a counter to an explicit value
    pub fn seed(&self, key: &CounterKey, value: u64) {
        self.counter(key).store(value, Ordering::SeqCst);
    }

    fn counter(&self, key: &CounterKey) -> Arc<AtomicU64> {
        if let Some(counter) = self.counters.read().get(key) {
            return Arc::clone(counter);
        }
        let mut counters = self.counters.write();
        Arc::clone(
            counters
                .entry(key.clone())
                .or_insert_with(|| Arc::new(AtomicU64::new(0))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_draw_is_zero() {
        let store = FaultCounterStore::new();
        let key = CounterKey::new("rest", "cart.checkout");
        assert_eq!(store.next_sequence(&key), 0);
        assert_eq!(store.next_sequence(&key), 1);
        assert_eq!(store.current(&key), 2);
    }

    #[test]
    fn counters_are_independent_per_key() {
        let store = FaultCounterStore::new();
        let a = CounterKey::new("rest", "cart.checkout");
        let b = CounterKey::new("highway", "cart.checkout");

        store.next_sequence(&a);
        store.next_sequence(&a);
        assert_eq!(store.next_sequence(&b), 0);
        assert_eq!(store.current(&a), 2);
    }

    #[test]
    fn seed_positions_the_counter() {
        let store = FaultCounterStore::new();
        let key = CounterKey::new("rest", "cart.checkout");
        store.seed(&key, 48);
        assert_eq!(store.next_sequence(&key), 48);
        assert_eq!(store.next_sequence(&key), 49);
    }

    #[test]
    fn concurrent_draws_never_collide() {
        let store = Arc::new(FaultCounterStore::new());
        let key = CounterKey::new("rest", "cart.checkout");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let key = key.clone();
                std::thread::spawn(move || {
                    (0..250).map(|_| store.next_sequence(&key)).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        seen.sort_unstable();
        let expected: Vec<u64> = (0..2000).collect();
        assert_eq!(seen, expected);
    }
}
