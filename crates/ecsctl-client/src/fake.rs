//! In-memory platform used by the client tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use ecsctl_core::{ListTasksFilter, RunTaskRequest, TaskDefinition, TaskRecord};

use crate::error::TransportError;
use crate::platform::{DefinitionLookup, TaskPage, TaskPlatform};

/// A remote call as observed by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List {
        filter: ListTasksFilter,
        next_token: Option<String>,
    },
    Describe(Vec<String>),
    DescribeDefinition(String),
    Run(RunTaskRequest),
    Stop(String),
}

#[derive(Default)]
pub struct FakePlatform {
    pages: Vec<Vec<String>>,
    records: HashMap<String, TaskRecord>,
    definitions: HashMap<String, TaskDefinition>,
    fail_list_page: Option<usize>,
    fail_describe_call: Option<usize>,
    fail_stop: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing returns these ARN batches, one page each, in order.
    pub fn with_pages<S: AsRef<str>>(mut self, pages: Vec<Vec<S>>) -> Self {
        self.pages = pages
            .into_iter()
            .map(|p| p.into_iter().map(|arn| arn.as_ref().to_string()).collect())
            .collect();
        self
    }

    pub fn with_record(mut self, record: TaskRecord) -> Self {
        self.records.insert(record.task_arn.clone(), record);
        self
    }

    pub fn with_definition(mut self, definition: TaskDefinition) -> Self {
        self.definitions
            .insert(definition.task_definition_arn.clone(), definition);
        self
    }

    pub fn failing_list_page(mut self, page: usize) -> Self {
        self.fail_list_page = Some(page);
        self
    }

    pub fn failing_describe(self) -> Self {
        self.failing_describe_call(0)
    }

    /// Only the `n`th describe call (zero-based) fails.
    pub fn failing_describe_call(mut self, n: usize) -> Self {
        self.fail_describe_call = Some(n);
        self
    }

    pub fn failing_stop(mut self, task_id: &str) -> Self {
        self.fail_stop.insert(task_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl TaskPlatform for FakePlatform {
    async fn list_tasks(
        &self,
        filter: &ListTasksFilter,
        next_token: Option<&str>,
    ) -> Result<TaskPage, TransportError> {
        self.record_call(Call::List {
            filter: filter.clone(),
            next_token: next_token.map(str::to_string),
        });

        let index = next_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        if self.fail_list_page == Some(index) {
            return Err(TransportError::api("ThrottlingException", "Rate exceeded"));
        }

        let task_arns = self.pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(TaskPage {
            task_arns,
            next_token,
        })
    }

    async fn describe_tasks(
        &self,
        _cluster: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskRecord>, TransportError> {
        let previous = self
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::Describe(_)))
            .count();
        self.record_call(Call::Describe(task_ids.to_vec()));

        if self.fail_describe_call == Some(previous) {
            return Err(TransportError::api("ServerException", "internal error"));
        }

        Ok(task_ids
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect())
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<(), TransportError> {
        self.record_call(Call::Run(request.clone()));
        Ok(())
    }

    async fn stop_task(
        &self,
        _cluster: &str,
        task_id: &str,
        _reason: &str,
    ) -> Result<(), TransportError> {
        self.record_call(Call::Stop(task_id.to_string()));

        if self.fail_stop.contains(task_id) {
            return Err(TransportError::api(
                "InvalidParameterException",
                "The referenced task was not found.",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DefinitionLookup for FakePlatform {
    async fn describe_task_definition(&self, arn: &str) -> Result<TaskDefinition, TransportError> {
        self.record_call(Call::DescribeDefinition(arn.to_string()));

        self.definitions
            .get(arn)
            .cloned()
            .ok_or_else(|| TransportError::api("ClientException", "Unable to describe task definition."))
    }
}
