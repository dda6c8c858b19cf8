//! Launch requests and listing filters.

use serde::{Deserialize, Serialize};

use crate::record::{ContainerOverride, KeyValuePair, TaskOverride};
use crate::{encode_started_by, CoreError, EnvVar};

/// Launch type every request is issued for.
pub const LAUNCH_TYPE_FARGATE: &str = "FARGATE";

const ASSIGN_PUBLIC_IP_ENABLED: &str = "ENABLED";

/// A one-shot request to start tasks of a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTaskInput {
    pub cluster_name: String,

    /// Number of tasks to start.
    pub count: u32,

    /// Command override; empty keeps the image default.
    pub command: Vec<String>,

    /// Environment override.
    pub env_vars: Vec<EnvVar>,

    pub security_group_ids: Vec<String>,

    pub subnet_ids: Vec<String>,

    /// Task definition reference (`family:revision` or ARN).
    pub task_definition_arn: String,

    /// Group name. Also names the container the override targets.
    pub task_name: String,
}

impl RunTaskInput {
    /// Build the launch request sent to the platform.
    ///
    /// At most one container override is created; it is left out entirely
    /// when neither a command nor environment override was supplied.
    pub fn to_request(&self) -> Result<RunTaskRequest, CoreError> {
        if self.task_name.is_empty() {
            return Err(CoreError::InvalidInput("task name must not be empty".into()));
        }
        if self.count == 0 {
            return Err(CoreError::InvalidInput("count must be at least 1".into()));
        }

        let mut container_overrides = Vec::new();
        if !self.command.is_empty() || !self.env_vars.is_empty() {
            container_overrides.push(ContainerOverride {
                name: Some(self.task_name.clone()),
                command: self.command.clone(),
                environment: self.env_vars.iter().map(KeyValuePair::from).collect(),
            });
        }

        Ok(RunTaskRequest {
            cluster: self.cluster_name.clone(),
            count: self.count,
            task_definition: self.task_definition_arn.clone(),
            launch_type: LAUNCH_TYPE_FARGATE.to_string(),
            started_by: encode_started_by(&self.task_name),
            network_configuration: NetworkConfiguration {
                awsvpc_configuration: AwsVpcConfiguration {
                    assign_public_ip: ASSIGN_PUBLIC_IP_ENABLED.to_string(),
                    subnets: self.subnet_ids.clone(),
                    security_groups: self.security_group_ids.clone(),
                },
            },
            overrides: TaskOverride {
                container_overrides,
            },
        })
    }
}

/// Wire form of a launch request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskRequest {
    pub cluster: String,
    pub count: u32,
    pub task_definition: String,
    pub launch_type: String,
    pub started_by: String,
    pub network_configuration: NetworkConfiguration,
    pub overrides: TaskOverride,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfiguration {
    pub awsvpc_configuration: AwsVpcConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsVpcConfiguration {
    pub assign_public_ip: String,
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
}

/// Which tasks a listing call returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksFilter {
    pub cluster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
}

impl ListTasksFilter {
    /// Every task in the cluster.
    pub fn all(cluster: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            ..Self::default()
        }
    }

    /// Tasks owned by a service, restricted to the Fargate launch type.
    pub fn for_service(cluster: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            launch_type: Some(LAUNCH_TYPE_FARGATE.to_string()),
            service_name: Some(service_name.into()),
            started_by: None,
        }
    }

    /// Tasks started with the marker of a group.
    pub fn for_group(cluster: impl Into<String>, group_name: &str) -> Self {
        Self {
            cluster: cluster.into(),
            started_by: Some(encode_started_by(group_name)),
            ..Self::default()
        }
    }
}
