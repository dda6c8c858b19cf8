//! Task client library for ecsctl.
//!
//! Rebuilds a consistent view of the tasks of a cluster from paginated
//! listings, runtime records and task definitions, and launches and stops
//! tasks. The remote side is reached through the [`TaskPlatform`] and
//! [`DefinitionLookup`] traits; [`HttpTransport`] implements both.

pub mod cache;
pub mod client;
pub mod error;
pub mod http;
pub mod lister;
pub mod platform;

#[cfg(test)]
mod fake;

pub use cache::CachedDefinitions;
pub use client::{TaskClient, STOP_REASON};
pub use error::{ClientError, TransportError};
pub use http::HttpTransport;
pub use lister::collect_task_arn_batches;
pub use platform::{DefinitionLookup, TaskPage, TaskPlatform};
