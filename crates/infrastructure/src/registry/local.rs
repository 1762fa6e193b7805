//! Local instance state
//!
//! The process's own view of its registry identity and status. Reads are
//! lock-free atomic snapshots; the sync task and registration flow are the
//! only writers.

use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};

use domain::{InstanceId, InstanceStatus, ServiceId};

/// Locally cached registration identity and status of this instance
#[derive(Debug, Default)]
pub struct LocalInstance {
    service_id: ArcSwapOption<ServiceId>,
    instance_id: ArcSwapOption<InstanceId>,
    status: ArcSwap<InstanceStatus>,
}

impl LocalInstance {
    /// Unregistered instance with the default `Up` status
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the ids the registry assigned during registration
    pub fn mark_registered(&self, service_id: ServiceId, instance_id: InstanceId) {
        self.service_id.store(Some(Arc::new(service_id)));
        self.instance_id.store(Some(Arc::new(instance_id)));
    }

    /// Registry-assigned service id, once registered
    #[must_use]
    pub fn service_id(&self) -> Option<Arc<ServiceId>> {
        self.service_id.load_full()
    }

    /// Registry-assigned instance id, once registered
    #[must_use]
    pub fn instance_id(&self) -> Option<Arc<InstanceId>> {
        self.instance_id.load_full()
    }

    /// Current locally cached status
    #[must_use]
    pub fn status(&self) -> InstanceStatus {
        **self.status.load()
    }

    /// Overwrite the locally cached status
    pub fn set_status(&self, status: InstanceStatus) {
        self.status.store(Arc::new(status));
    }

    /// Whether the instance may currently serve normal traffic
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status().is_available()
    }
}
