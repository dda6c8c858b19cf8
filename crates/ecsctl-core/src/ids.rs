//! Newtype wrapper for task identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short identifier of a task: the trailing segment of its ARN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Create a new TaskId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id from a full resource path.
    ///
    /// `arn:aws:ecs:us-east-1:123:task/cluster/abc` becomes `abc`. A value
    /// without any `/` is returned unchanged.
    pub fn from_arn(arn: &str) -> Self {
        let id = arn.rsplit('/').next().unwrap_or(arn);
        Self(id.to_owned())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arn_takes_trailing_segment() {
        let id = TaskId::from_arn("arn:aws:ecs:us-east-1:123456789012:task/web/0f3c2a");
        assert_eq!(id.as_str(), "0f3c2a");
    }

    #[test]
    fn test_from_arn_without_slash() {
        let id = TaskId::from_arn("0f3c2a");
        assert_eq!(id, TaskId::new("0f3c2a"));
    }

    #[test]
    fn test_id_display() {
        let id = TaskId::new("test-123");
        assert_eq!(format!("{}", id), "test-123");
    }
}
