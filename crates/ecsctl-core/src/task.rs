//! Reconstructed task snapshots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ContainerOverride, TaskDefinition, TaskRecord};
use crate::{decode_started_by, merge_env, EnvVar, NetworkBinding, TaskId, TaskStatus};

/// A Task is a point-in-time view of one running unit on the platform.
///
/// It is assembled from three independently fetched sources: the runtime
/// record, the task definition it was launched from, and the container
/// override supplied at launch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Short task identifier.
    pub task_id: TaskId,

    /// CPU reservation as reported (units of 1/1024 vCPU).
    pub cpu: String,

    /// Memory reservation as reported (MiB).
    pub memory: String,

    /// When the platform created the task.
    pub created_at: Option<DateTime<Utc>>,

    pub desired_status: TaskStatus,

    pub last_status: TaskStatus,

    /// Image of the first container of the task definition.
    pub image: String,

    /// IAM role assumed by the task, if the definition declares one.
    pub task_role: Option<String>,

    /// Command override; empty when the task runs the image default.
    pub command: Vec<String>,

    /// Effective environment, overrides first.
    pub env_vars: Vec<EnvVar>,

    /// Elastic network interface id.
    pub eni_id: Option<String>,

    pub subnet_id: Option<String>,

    /// Group decoded from `started_by`.
    pub task_group: Option<String>,

    /// Raw start marker.
    pub started_by: String,

    /// Revision of the task definition the task runs.
    pub deployment_id: String,

    pub task_definition_arn: String,
}

impl Task {
    /// Merge a runtime record with its definition and launch override.
    ///
    /// Only the first container of the definition and the first attachment of
    /// the record are consulted. The definition's own command is never used.
    pub fn assemble(
        record: &TaskRecord,
        definition: &TaskDefinition,
        container_override: Option<&ContainerOverride>,
    ) -> Self {
        let container = definition.primary_container();

        let declared: Vec<EnvVar> = container
            .map(|c| c.environment.iter().map(EnvVar::from).collect())
            .unwrap_or_default();
        let overrides: Vec<EnvVar> = container_override
            .map(|o| o.environment.iter().map(EnvVar::from).collect())
            .unwrap_or_default();

        let network = NetworkBinding::from_attachment(record.primary_attachment());
        let started_by = record.started_by.clone().unwrap_or_default();

        Self {
            task_id: TaskId::from_arn(&record.task_arn),
            cpu: record.cpu.clone().unwrap_or_default(),
            memory: record.memory.clone().unwrap_or_default(),
            created_at: record.created_at,
            desired_status: record.desired_status,
            last_status: record.last_status,
            image: container
                .and_then(|c| c.image.clone())
                .unwrap_or_default(),
            task_role: definition.task_role_arn.clone(),
            command: container_override
                .map(|o| o.command.clone())
                .unwrap_or_default(),
            env_vars: merge_env(&declared, &overrides),
            eni_id: network.eni_id,
            subnet_id: network.subnet_id,
            task_group: decode_started_by(&started_by).map(str::to_string),
            started_by,
            deployment_id: deployment_id(&record.task_definition_arn).to_string(),
            task_definition_arn: record.task_definition_arn.clone(),
        }
    }

    /// Time since creation, truncated to whole seconds.
    pub fn running_for(&self, now: DateTime<Utc>) -> Duration {
        self.created_at
            .map(|created| now.signed_duration_since(created))
            .filter(|elapsed| *elapsed > Duration::zero())
            .map(|elapsed| Duration::seconds(elapsed.num_seconds()))
            .unwrap_or_else(Duration::zero)
    }
}

/// Revision suffix of a task definition reference (`family:7` gives `7`).
pub fn deployment_id(task_definition_arn: &str) -> &str {
    match task_definition_arn.rsplit_once(':') {
        Some((_, revision)) if !revision.is_empty() && revision.bytes().all(|b| b.is_ascii_digit()) => {
            revision
        }
        _ => "",
    }
}
