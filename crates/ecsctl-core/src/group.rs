//! Task groups recovered from the encoded start marker.
//!
//! The platform has no native grouping of standalone tasks. At launch the
//! group name is written into the free-text `startedBy` field as
//! `fargate:<name>`; listing decodes it back. The prefix is a wire contract
//! shared with every other client that launched tasks on the cluster.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Task;

/// Literal prefix of an encoded start marker.
pub const STARTED_BY_PREFIX: &str = "fargate:";

const STARTED_BY_PATTERN: &str = r"(?s)^fargate:(.*)$";

fn started_by_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(STARTED_BY_PATTERN).expect("start marker pattern is valid"))
}

/// Encode a group name into a start marker.
pub fn encode_started_by(group_name: &str) -> String {
    format!("{STARTED_BY_PREFIX}{group_name}")
}

/// Decode the group name from a start marker, if it carries one.
pub fn decode_started_by(started_by: &str) -> Option<&str> {
    started_by_regex()
        .captures(started_by)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// A logical group of tasks sharing a launch name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskGroup {
    /// Decoded group name.
    pub name: String,

    /// Number of tasks in the listing that carry this group's marker.
    pub instances: u64,
}

/// Count tasks per group.
///
/// Groups appear in the order their first task appears. Tasks without a
/// decodable marker are skipped.
pub fn aggregate_task_groups<'a, I>(tasks: I) -> Vec<TaskGroup>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut groups: Vec<TaskGroup> = Vec::new();

    for name in tasks
        .into_iter()
        .filter_map(|t| decode_started_by(&t.started_by))
    {
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.instances += 1,
            None => groups.push(TaskGroup {
                name: name.to_string(),
                instances: 1,
            }),
        }
    }

    groups
}
