//! Collaborator interfaces consumed by the client.
//!
//! `TaskPlatform` issues the task calls; `DefinitionLookup` resolves a task
//! definition reference. Both are implemented by [`HttpTransport`] and can be
//! swapped for anything else that speaks the same contract.
//!
//! [`HttpTransport`]: crate::http::HttpTransport

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use ecsctl_core::{ListTasksFilter, RunTaskRequest, TaskDefinition, TaskRecord};

use crate::error::TransportError;

/// One page of a task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPage {
    pub task_arns: Vec<String>,

    /// Present when more pages follow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Remote task operations.
#[async_trait]
pub trait TaskPlatform: Send + Sync {
    /// Fetch one page of task ARNs. `next_token` is `None` for the first page.
    async fn list_tasks(
        &self,
        filter: &ListTasksFilter,
        next_token: Option<&str>,
    ) -> Result<TaskPage, TransportError>;

    /// Fetch runtime records. Tasks that no longer exist are left out.
    async fn describe_tasks(
        &self,
        cluster: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskRecord>, TransportError>;

    async fn run_task(&self, request: &RunTaskRequest) -> Result<(), TransportError>;

    async fn stop_task(&self, cluster: &str, task_id: &str, reason: &str)
        -> Result<(), TransportError>;
}

/// Resolves a task definition reference to its image, role and environment.
#[async_trait]
pub trait DefinitionLookup: Send + Sync {
    async fn describe_task_definition(&self, arn: &str) -> Result<TaskDefinition, TransportError>;
}

#[async_trait]
impl<T: TaskPlatform + ?Sized> TaskPlatform for Arc<T> {
    async fn list_tasks(
        &self,
        filter: &ListTasksFilter,
        next_token: Option<&str>,
    ) -> Result<TaskPage, TransportError> {
        (**self).list_tasks(filter, next_token).await
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskRecord>, TransportError> {
        (**self).describe_tasks(cluster, task_ids).await
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<(), TransportError> {
        (**self).run_task(request).await
    }

    async fn stop_task(
        &self,
        cluster: &str,
        task_id: &str,
        reason: &str,
    ) -> Result<(), TransportError> {
        (**self).stop_task(cluster, task_id, reason).await
    }
}

#[async_trait]
impl<T: DefinitionLookup + ?Sized> DefinitionLookup for Arc<T> {
    async fn describe_task_definition(&self, arn: &str) -> Result<TaskDefinition, TransportError> {
        (**self).describe_task_definition(arn).await
    }
}
