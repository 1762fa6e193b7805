//! Circuit-open observation and alarm dedup

mod watcher;

pub use watcher::CircuitWatcher;
