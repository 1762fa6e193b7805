//! Service registry client port

use async_trait::async_trait;
use domain::{InstanceId, InstanceRecord, RegistryError, ServiceId};
#[cfg(test)]
use mockall::automock;

/// Port for querying the central service registry
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Look up one instance's current record
    ///
    /// `Ok(None)` means the registry holds no record for this instance
    /// (evicted or not yet registered); transport problems surface as
    /// `RegistryError`.
    async fn find_service_instance(
        &self,
        service_id: &ServiceId,
        instance_id: &InstanceId,
    ) -> Result<Option<InstanceRecord>, RegistryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::InstanceStatus;

    #[test]
    fn trait_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn RegistryClient>();
    }

    #[tokio::test]
    async fn mock_returns_record() {
        let mut client = MockRegistryClient::new();
        client.expect_find_service_instance().returning(|_, instance_id| {
            Ok(Some(InstanceRecord {
                instance_id: instance_id.clone(),
                status: InstanceStatus::Up,
                endpoints: vec![],
            }))
        });

        let record = client
            .find_service_instance(
                &ServiceId::new("svc-1").unwrap(),
                &InstanceId::new("inst-1").unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(record.unwrap().status, InstanceStatus::Up);
    }
}
