//! HTTP transport for the ECS JSON 1.1 protocol.
//!
//! Every action is a `POST /` with the action named in the `X-Amz-Target`
//! header. Requests are not signed; point the endpoint at an ECS-compatible
//! service or a signing proxy.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ecsctl_core::{ListTasksFilter, RunTaskRequest, TaskDefinition, TaskRecord};

use crate::error::TransportError;
use crate::platform::{DefinitionLookup, TaskPage, TaskPlatform};

const TARGET_PREFIX: &str = "AmazonEC2ContainerServiceV20141113";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Largest page the listing call accepts.
pub const LIST_PAGE_SIZE: u32 = 100;

/// Failure reason for tasks that no longer exist.
const FAILURE_MISSING: &str = "MISSING";

/// HTTP client for the orchestration API.
pub struct HttpTransport {
    inner: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a new transport. `timeout` bounds each call.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call<B, R>(&self, action: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/", self.endpoint);
        debug!(url = %url, action = %action, "POST request");

        let response = self
            .inner
            .post(&url)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"))
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

fn api_error(status: reqwest::StatusCode, bytes: &[u8]) -> TransportError {
    let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();

    // `__type` may be namespaced: `com.amazonaws.ecs#ClusterNotFoundException`.
    let code = body
        .kind
        .as_deref()
        .map(|k| k.rsplit('#').next().unwrap_or(k).to_string())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    let message = body
        .message
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).trim().to_string());

    TransportError::Api { code, message }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Failure {
    arn: Option<String>,
    reason: Option<String>,
    detail: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListTasksBody<'a> {
    #[serde(flatten)]
    filter: &'a ListTasksFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_token: Option<&'a str>,
    max_results: u32,
}

#[derive(Serialize)]
struct DescribeTasksBody<'a> {
    cluster: &'a str,
    tasks: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DescribeTasksResponse {
    tasks: Vec<TaskRecord>,
    failures: Vec<Failure>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescribeTaskDefinitionBody<'a> {
    task_definition: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeTaskDefinitionResponse {
    task_definition: TaskDefinition,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunTaskResponse {
    failures: Vec<Failure>,
}

#[derive(Serialize)]
struct StopTaskBody<'a> {
    cluster: &'a str,
    task: &'a str,
    reason: &'a str,
}

#[async_trait]
impl TaskPlatform for HttpTransport {
    async fn list_tasks(
        &self,
        filter: &ListTasksFilter,
        next_token: Option<&str>,
    ) -> Result<TaskPage, TransportError> {
        let body = ListTasksBody {
            filter,
            next_token,
            max_results: LIST_PAGE_SIZE,
        };
        self.call("ListTasks", &body).await
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskRecord>, TransportError> {
        let body = DescribeTasksBody {
            cluster,
            tasks: task_ids,
        };
        let response: DescribeTasksResponse = self.call("DescribeTasks", &body).await?;

        for failure in &response.failures {
            match failure.reason.as_deref() {
                Some(FAILURE_MISSING) => {
                    debug!(arn = ?failure.arn, "Task vanished before describe");
                }
                _ => {
                    warn!(arn = ?failure.arn, reason = ?failure.reason, "Describe failure");
                    return Err(failure_error(failure));
                }
            }
        }

        Ok(response.tasks)
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<(), TransportError> {
        let response: RunTaskResponse = self.call("RunTask", request).await?;

        match response.failures.first() {
            Some(failure) => Err(failure_error(failure)),
            None => Ok(()),
        }
    }

    async fn stop_task(
        &self,
        cluster: &str,
        task_id: &str,
        reason: &str,
    ) -> Result<(), TransportError> {
        let body = StopTaskBody {
            cluster,
            task: task_id,
            reason,
        };
        let _: serde_json::Value = self.call("StopTask", &body).await?;
        Ok(())
    }
}

#[async_trait]
impl DefinitionLookup for HttpTransport {
    async fn describe_task_definition(&self, arn: &str) -> Result<TaskDefinition, TransportError> {
        let body = DescribeTaskDefinitionBody {
            task_definition: arn,
        };
        let response: DescribeTaskDefinitionResponse =
            self.call("DescribeTaskDefinition", &body).await?;
        Ok(response.task_definition)
    }
}

fn failure_error(failure: &Failure) -> TransportError {
    let reason = failure.reason.clone().unwrap_or_else(|| "UNKNOWN".to_string());
    let message = match (&failure.arn, &failure.detail) {
        (Some(arn), Some(detail)) => format!("{arn}: {detail}"),
        (Some(arn), None) => arn.clone(),
        (None, Some(detail)) => detail.clone(),
        (None, None) => String::new(),
    };
    TransportError::Api {
        code: reason,
        message,
    }
}
