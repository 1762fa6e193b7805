//! Load balancer port

use domain::{Endpoint, Invocation};
#[cfg(test)]
use mockall::automock;

/// Port for the pluggable load-balancing rule
///
/// Called once per dispatch attempt; next-server retries call it again to
/// re-select.
#[cfg_attr(test, automock)]
pub trait InstanceSelector: Send + Sync {
    /// Choose an endpoint for this invocation, or `None` when no instance
    /// is eligible
    fn select(&self, invocation: &Invocation) -> Option<Endpoint>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn InstanceSelector>();
    }
}
