//! Memoizing task definition lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use ecsctl_core::TaskDefinition;

use crate::error::TransportError;
use crate::platform::DefinitionLookup;

/// Caches definitions by reference. Definitions are immutable once
/// registered, so entries never expire. Failures are not cached.
pub struct CachedDefinitions<L> {
    inner: L,
    cache: RwLock<HashMap<String, TaskDefinition>>,
}

impl<L: DefinitionLookup> CachedDefinitions<L> {
    /// Wrap a lookup.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<L: DefinitionLookup> DefinitionLookup for CachedDefinitions<L> {
    async fn describe_task_definition(&self, arn: &str) -> Result<TaskDefinition, TransportError> {
        if let Some(definition) = self.cache.read().await.get(arn) {
            return Ok(definition.clone());
        }

        debug!(task_definition = %arn, "Task definition cache miss");
        let definition = self.inner.describe_task_definition(arn).await?;

        let mut cache = self.cache.write().await;
        cache.insert(arn.to_string(), definition.clone());
        debug!(cached = cache.len(), "Task definition cached");

        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::fake::{Call, FakePlatform};

    const DEF_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task-definition/web:1";

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let platform = Arc::new(FakePlatform::new().with_definition(TaskDefinition {
            task_definition_arn: DEF_ARN.to_string(),
            ..TaskDefinition::default()
        }));
        let cached = CachedDefinitions::new(platform.clone());

        let first = cached.describe_task_definition(DEF_ARN).await.unwrap();
        let second = cached.describe_task_definition(DEF_ARN).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(platform.calls(), vec![Call::DescribeDefinition(DEF_ARN.to_string())]);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let platform = Arc::new(FakePlatform::new());
        let cached = CachedDefinitions::new(platform.clone());

        assert!(cached.describe_task_definition(DEF_ARN).await.is_err());
        assert!(cached.describe_task_definition(DEF_ARN).await.is_err());

        assert_eq!(platform.calls().len(), 2);
    }
}
