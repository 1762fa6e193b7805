//! Instance status sync task
//!
//! Periodically reconciles the locally cached instance status against the
//! registry's view, last-writer-wins in the registry's favor. The task
//! arms itself only after observing this microservice's registration
//! finish, and degrades to a warning (plus a one-shot alert after repeated
//! failures) whenever the registry is unreachable.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use application::RegistryClient;
use domain::{Microservice, QualifiedName};

use crate::events::EventChannel;

use super::local::LocalInstance;

/// Lifecycle phase of the sync task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not yet armed; registration has not finished
    Init,
    /// Armed; reconciliation passes run
    Ready,
    /// Shut down permanently
    Finished,
}

/// Registration lifecycle event broadcast by the registration flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationEvent {
    /// Microservice the event is about
    pub microservice: QualifiedName,
    /// Phase the registration task reached
    pub task_status: TaskStatus,
}

/// Reconciles local instance status against the registry
pub struct StatusSyncTask {
    microservice: Microservice,
    instance: Arc<LocalInstance>,
    registry: Arc<dyn RegistryClient>,
    status: Mutex<TaskStatus>,
    consecutive_failures: AtomicU32,
    alert_threshold: u32,
    alerted: AtomicBool,
}

impl StatusSyncTask {
    /// Failures in a row before the one-shot alert fires
    pub const DEFAULT_ALERT_THRESHOLD: u32 = 3;

    /// Task for one microservice's local instance
    #[must_use]
    pub fn new(
        microservice: Microservice,
        instance: Arc<LocalInstance>,
        registry: Arc<dyn RegistryClient>,
    ) -> Self {
        Self::with_alert_threshold(microservice, instance, registry, Self::DEFAULT_ALERT_THRESHOLD)
    }

    /// Task with an explicit consecutive-failure alert threshold
    #[must_use]
    pub fn with_alert_threshold(
        microservice: Microservice,
        instance: Arc<LocalInstance>,
        registry: Arc<dyn RegistryClient>,
        alert_threshold: u32,
    ) -> Self {
        Self {
            microservice,
            instance,
            registry,
            status: Mutex::new(TaskStatus::Init),
            consecutive_failures: AtomicU32::new(0),
            alert_threshold,
            alerted: AtomicBool::new(false),
        }
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        *self.status.lock()
    }

    /// Shut the task down permanently
    pub fn finish(&self) {
        *self.status.lock() = TaskStatus::Finished;
    }

    /// React to a registration lifecycle event
    ///
    /// Arms the task when this microservice's registration finished;
    /// events about other services or other phases are ignored, and a
    /// finished task never re-arms.
    pub fn on_registration_event(&self, event: &RegistrationEvent) {
        if event.task_status != TaskStatus::Finished
            || event.microservice != *self.microservice.qualified_name()
        {
            return;
        }
        let mut status = self.status.lock();
        if *status == TaskStatus::Init {
            info!(
                microservice = %self.microservice.qualified_name(),
                "registration finished, status sync armed"
            );
            *status = TaskStatus::Ready;
        }
    }

    /// Run one reconciliation pass if the task is armed
    pub async fn run(&self) {
        if self.status() != TaskStatus::Ready {
            return;
        }
        self.sync_once().await;
    }

    async fn sync_once(&self) {
        let (Some(service_id), Some(instance_id)) =
            (self.instance.service_id(), self.instance.instance_id())
        else {
            warn!("instance not registered yet, skipping status sync");
            return;
        };

        match self
            .registry
            .find_service_instance(&service_id, &instance_id)
            .await
        {
            Err(err) => {
                warn!(error = %err, "status sync against registry failed");
                self.note_failure();
            }
            Ok(None) => {
                // The registry evicted us; re-registration is someone
                // else's job, so just report and wait.
                warn!(
                    instance = %instance_id,
                    "instance unknown to registry, waiting for re-registration"
                );
                self.note_success();
            }
            Ok(Some(record)) => {
                self.note_success();
                let local = self.instance.status();
                if record.status != local {
                    info!(
                        from = %local,
                        to = %record.status,
                        "adopting instance status from registry"
                    );
                    self.instance.set_status(record.status);
                }
            }
        }
    }

    fn note_failure(&self) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
        if failures >= self.alert_threshold && !self.alerted.swap(true, Ordering::SeqCst) {
            error!(
                microservice = %self.microservice.qualified_name(),
                failures,
                "status sync failing repeatedly, registry may be down"
            );
        }
    }

    fn note_success(&self) {
        self.consecutive_failures.store(0, Ordering::SeqCst);
        self.alerted.store(false, Ordering::SeqCst);
    }

    /// Subscribe the task to registration events on a broadcast channel
    ///
    /// The spawned task ends when the channel closes or the task is
    /// finished.
    pub fn spawn_subscription(
        task: Arc<Self>,
        events: &EventChannel<RegistrationEvent>,
    ) -> JoinHandle<()> {
        let mut rx = events.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        task.on_registration_event(&event);
                        if task.status() == TaskStatus::Finished {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "registration event subscription lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl std::fmt::Debug for StatusSyncTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusSyncTask")
            .field("microservice", &self.microservice)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
