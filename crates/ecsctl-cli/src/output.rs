//! Table and detail rendering.

use std::fmt::Write;

use chrono::{DateTime, Duration, Utc};

use ecsctl_core::{Task, TaskGroup};

/// Render the task groups table.
pub fn groups_table(groups: &[TaskGroup]) -> String {
    let mut out = String::new();

    writeln!(out, "{:<32}  {}", "NAME", "INSTANCES").ok();
    for group in groups {
        writeln!(out, "{:<32}  {}", group.name, group.instances).ok();
    }

    out
}

/// Render the task listing table.
pub fn tasks_table(tasks: &[Task], now: DateTime<Utc>) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "{:<36}  {:<32}  {:<12}  {:<10}  {:<5}  {:<6}  {}",
        "ID", "IMAGE", "STATUS", "RUNNING", "CPU", "MEMORY", "DEPLOYMENT"
    )
    .ok();

    for task in tasks {
        writeln!(
            out,
            "{:<36}  {:<32}  {:<12}  {:<10}  {:<5}  {:<6}  {}",
            task.task_id,
            task.image,
            task.last_status,
            format_duration(task.running_for(now)),
            task.cpu,
            task.memory,
            task.deployment_id
        )
        .ok();
    }

    out
}

/// Render one detail block per task.
pub fn task_details(tasks: &[Task], now: DateTime<Utc>) -> String {
    let mut out = String::new();

    for task in tasks {
        writeln!(out, "Task: {}", task.task_id).ok();
        writeln!(out, "  Group:       {}", task.task_group.as_deref().unwrap_or("-")).ok();
        writeln!(
            out,
            "  Status:      {} (desired {})",
            task.last_status, task.desired_status
        )
        .ok();
        writeln!(out, "  Running for: {}", format_duration(task.running_for(now))).ok();
        writeln!(out, "  Image:       {}", task.image).ok();
        writeln!(out, "  Deployment:  {}", task.deployment_id).ok();
        writeln!(out, "  CPU:         {}", task.cpu).ok();
        writeln!(out, "  Memory:      {}", task.memory).ok();
        writeln!(out, "  Task role:   {}", task.task_role.as_deref().unwrap_or("-")).ok();
        writeln!(out, "  Subnet:      {}", task.subnet_id.as_deref().unwrap_or("-")).ok();
        writeln!(out, "  ENI:         {}", task.eni_id.as_deref().unwrap_or("-")).ok();

        if !task.command.is_empty() {
            writeln!(out, "  Command:     {}", task.command.join(" ")).ok();
        }

        if !task.env_vars.is_empty() {
            let mut env_vars: Vec<_> = task.env_vars.iter().collect();
            env_vars.sort_by(|a, b| a.key.cmp(&b.key));

            writeln!(out, "  Environment:").ok();
            for var in env_vars {
                writeln!(out, "    {}={}", var.key, var.value).ok();
            }
        }
    }

    out
}

/// Compact duration, e.g. `1h2m3s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
