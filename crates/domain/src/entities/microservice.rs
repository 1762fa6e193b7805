//! Microservice and instance record entities

use serde::{Deserialize, Serialize};

use crate::value_objects::{Endpoint, InstanceId, InstanceStatus, QualifiedName, ServiceId};

/// Identity of the local microservice as known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Microservice {
    qualified_name: QualifiedName,
    service_id: Option<ServiceId>,
}

impl Microservice {
    /// Create an unregistered microservice identity
    #[must_use]
    pub const fn new(qualified_name: QualifiedName) -> Self {
        Self {
            qualified_name,
            service_id: None,
        }
    }

    /// Qualified name of the service
    #[must_use]
    pub const fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// Registry-assigned id, once registration completed
    #[must_use]
    pub const fn service_id(&self) -> Option<&ServiceId> {
        self.service_id.as_ref()
    }

    /// Record the id the registry assigned
    pub fn assign_service_id(&mut self, id: ServiceId) {
        self.service_id = Some(id);
    }
}

/// One instance's record as returned by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Registry-assigned instance id
    pub instance_id: InstanceId,
    /// Status the registry currently holds for this instance
    pub status: InstanceStatus,
    /// Endpoints the instance published
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}
