//! ecsctl Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/HTTP
//! - Runtime specifics
//!
//! It also holds the pure steps used to reconstruct tasks from the platform's
//! fragmented records: environment merging, attachment extraction, the
//! start-marker codec, and task group aggregation.

pub mod attachment;
pub mod env;
pub mod error;
pub mod group;
pub mod ids;
pub mod record;
pub mod run;
pub mod status;
pub mod task;

// Re-export commonly used types
pub use attachment::NetworkBinding;
pub use env::{merge_env, EnvVar};
pub use error::CoreError;
pub use group::{aggregate_task_groups, decode_started_by, encode_started_by, TaskGroup};
pub use ids::TaskId;
pub use record::{
    Attachment, ContainerDefinition, ContainerOverride, KeyValuePair, TaskDefinition, TaskOverride,
    TaskRecord,
};
pub use run::{ListTasksFilter, RunTaskInput, RunTaskRequest, LAUNCH_TYPE_FARGATE};
pub use status::TaskStatus;
pub use task::Task;
