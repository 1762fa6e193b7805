//! Invocation kind value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the caller consumes the invocation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationKind {
    /// Caller blocks on the outcome
    #[default]
    Sync,
    /// Caller receives the outcome through a completion callback
    Async,
}

impl fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => write!(f, "sync"),
            Self::Async => write!(f, "async"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(InvocationKind::Sync.to_string(), "sync");
        assert_eq!(InvocationKind::Async.to_string(), "async");
    }
}
