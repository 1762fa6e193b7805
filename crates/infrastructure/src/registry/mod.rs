//! Registry-facing state and the status sync task

mod local;
mod sync_task;

pub use local::LocalInstance;
pub use sync_task::{RegistrationEvent, StatusSyncTask, TaskStatus};
