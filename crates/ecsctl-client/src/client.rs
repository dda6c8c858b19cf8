//! Task client: listing, reconstruction, grouping, launch and stop.

use tracing::{debug, info};

use ecsctl_core::{aggregate_task_groups, ListTasksFilter, RunTaskInput, Task, TaskGroup};

use crate::error::ClientError;
use crate::lister::collect_task_arn_batches;
use crate::platform::{DefinitionLookup, TaskPlatform};

/// Reason attached to stop calls.
pub const STOP_REASON: &str = "Stopped by ecsctl";

/// Client for the tasks of one cluster.
///
/// Calls are issued one at a time; nothing is cached except what the
/// definition lookup chooses to cache.
pub struct TaskClient<P, D> {
    cluster: String,
    platform: P,
    definitions: D,
}

impl<P, D> TaskClient<P, D>
where
    P: TaskPlatform,
    D: DefinitionLookup,
{
    /// Create a client bound to `cluster`.
    pub fn new(cluster: impl Into<String>, platform: P, definitions: D) -> Self {
        Self {
            cluster: cluster.into(),
            platform,
            definitions,
        }
    }

    /// Cluster this client operates on.
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Tasks owned by a service.
    pub async fn list_tasks_for_service(&self, service_name: &str) -> Result<Vec<Task>, ClientError> {
        self.list_tasks(&ListTasksFilter::for_service(&self.cluster, service_name))
            .await
    }

    /// Tasks launched into a group.
    pub async fn list_tasks_for_group(&self, group_name: &str) -> Result<Vec<Task>, ClientError> {
        self.list_tasks(&ListTasksFilter::for_group(&self.cluster, group_name))
            .await
    }

    /// Groups present in the cluster with their instance counts.
    pub async fn list_task_groups(&self) -> Result<Vec<TaskGroup>, ClientError> {
        let tasks = self.list_tasks(&ListTasksFilter::all(&self.cluster)).await?;
        let groups = aggregate_task_groups(&tasks);

        debug!(
            cluster = %self.cluster,
            tasks = tasks.len(),
            groups = groups.len(),
            "Aggregated task groups"
        );

        Ok(groups)
    }

    /// Launch tasks. The input's own cluster is used.
    pub async fn run_task(&self, input: &RunTaskInput) -> Result<(), ClientError> {
        let request = input.to_request()?;

        info!(
            cluster = %request.cluster,
            task_definition = %request.task_definition,
            started_by = %request.started_by,
            count = request.count,
            "Running task"
        );

        self.platform
            .run_task(&request)
            .await
            .map_err(ClientError::RunTask)
    }

    /// Stop one task.
    pub async fn stop_task(&self, task_id: &str) -> Result<(), ClientError> {
        info!(cluster = %self.cluster, task_id = %task_id, "Stopping task");

        self.platform
            .stop_task(&self.cluster, task_id, STOP_REASON)
            .await
            .map_err(|source| ClientError::StopTask {
                task_id: task_id.to_string(),
                source,
            })
    }

    /// Stop tasks one after another, in order. The first failure ends the
    /// batch; later tasks are not attempted.
    pub async fn stop_tasks(&self, task_ids: &[String]) -> Result<(), ClientError> {
        for task_id in task_ids {
            self.stop_task(task_id).await?;
        }
        Ok(())
    }

    /// Describe a batch of tasks and assemble them.
    ///
    /// The batch must respect the platform's describe limit. The result
    /// follows the platform's order and leaves out tasks that no longer exist.
    pub async fn describe_tasks(&self, task_ids: &[String]) -> Result<Vec<Task>, ClientError> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = self
            .platform
            .describe_tasks(&self.cluster, task_ids)
            .await
            .map_err(ClientError::DescribeTasks)?;

        debug!(
            requested = task_ids.len(),
            described = records.len(),
            "Described tasks"
        );

        let mut tasks = Vec::with_capacity(records.len());
        for record in &records {
            let definition = self
                .definitions
                .describe_task_definition(&record.task_definition_arn)
                .await
                .map_err(|source| ClientError::DescribeTaskDefinition {
                    arn: record.task_definition_arn.clone(),
                    source,
                })?;

            tasks.push(Task::assemble(record, &definition, record.primary_override()));
        }

        Ok(tasks)
    }

    async fn list_tasks(&self, filter: &ListTasksFilter) -> Result<Vec<Task>, ClientError> {
        let batches = collect_task_arn_batches(&self.platform, filter).await?;

        let mut tasks = Vec::new();
        for batch in &batches {
            tasks.extend(self.describe_tasks(batch).await?);
        }

        Ok(tasks)
    }
}
