//! CLI configuration.

use std::time::Duration;

/// Region used when neither an endpoint nor a region is given.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Cluster used when none is given.
pub const DEFAULT_CLUSTER: &str = "fargate";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cluster every command operates on.
    pub cluster: String,

    /// API endpoint.
    pub endpoint: String,

    /// Per-call timeout.
    pub timeout: Duration,
}

impl Config {
    /// Resolve configuration. An explicit endpoint wins over the region.
    pub fn new(cluster: String, endpoint: Option<String>, region: &str, timeout_secs: u64) -> Self {
        let endpoint = endpoint
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| endpoint_for_region(region));

        Self {
            cluster,
            endpoint,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_CLUSTER.to_string(), None, DEFAULT_REGION, 30)
    }
}

/// Public endpoint of the service in a region.
pub fn endpoint_for_region(region: &str) -> String {
    format!("https://ecs.{region}.amazonaws.com")
}
