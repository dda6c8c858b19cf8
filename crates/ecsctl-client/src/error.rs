//! Error types for the task client.

use ecsctl_core::CoreError;
use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP error (connection, timeout, body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the call.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl TransportError {
    /// Build an API error.
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Terminal failure of a client operation.
///
/// Every remote failure aborts the operation in flight; the variant names the
/// operation and the source carries the underlying cause.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not list tasks: {0}")]
    ListTasks(#[source] TransportError),

    #[error("could not describe tasks: {0}")]
    DescribeTasks(#[source] TransportError),

    #[error("could not describe task definition {arn}: {source}")]
    DescribeTaskDefinition {
        arn: String,
        #[source]
        source: TransportError,
    },

    #[error("could not run task: {0}")]
    RunTask(#[source] TransportError),

    #[error("could not stop task {task_id}: {source}")]
    StopTask {
        task_id: String,
        #[source]
        source: TransportError,
    },

    /// The request was rejected before any call was made.
    #[error("invalid request: {0}")]
    InvalidInput(#[from] CoreError),
}

impl ClientError {
    /// Short name of the failed operation.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::ListTasks(_) => "listing",
            Self::DescribeTasks(_) | Self::DescribeTaskDefinition { .. } => "describing",
            Self::RunTask(_) => "running",
            Self::StopTask { .. } => "stopping",
            Self::InvalidInput(_) => "validating",
        }
    }
}
