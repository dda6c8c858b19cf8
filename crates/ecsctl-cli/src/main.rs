//! ecsctl - Command line interface for tasks on a Fargate cluster.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ecsctl_client::{CachedDefinitions, HttpTransport, TaskClient};
use ecsctl_core::{EnvVar, RunTaskInput, Task};

mod config;
mod output;

use config::{Config, DEFAULT_CLUSTER, DEFAULT_REGION};

type Client = TaskClient<Arc<HttpTransport>, CachedDefinitions<Arc<HttpTransport>>>;

/// ecsctl - Manage task groups and service tasks
#[derive(Parser)]
#[command(name = "ecsctl")]
#[command(about = "Launch, list and stop tasks on a Fargate cluster", long_about = None)]
struct Cli {
    /// Cluster name
    #[arg(short, long, global = true, env = "ECSCTL_CLUSTER", default_value = DEFAULT_CLUSTER)]
    cluster: String,

    /// API endpoint (defaults to the regional endpoint)
    #[arg(long, global = true, env = "ECSCTL_ENDPOINT")]
    endpoint: Option<String>,

    /// Region used to derive the endpoint
    #[arg(long, global = true, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage task groups
    #[command(subcommand)]
    Task(TaskCommand),

    /// Inspect services
    #[command(subcommand)]
    Service(ServiceCommand),
}

#[derive(Subcommand)]
enum TaskCommand {
    /// List task groups
    List,

    /// List the tasks of a group
    Ps {
        /// Task group name
        group: String,
    },

    /// Show details of the tasks of a group
    Info {
        /// Task group name
        group: String,

        /// Only these task ids
        #[arg(long = "task")]
        tasks: Vec<String>,
    },

    /// Run tasks in a group
    Run {
        /// Task group name
        group: String,

        /// Task definition (family:revision or ARN)
        #[arg(short = 'd', long)]
        task_definition: String,

        /// Number of tasks to start
        #[arg(short, long, default_value_t = 1)]
        num: u32,

        /// Environment override (KEY=VALUE), repeatable
        #[arg(short, long = "env")]
        env_vars: Vec<EnvVar>,

        /// Subnet id, repeatable
        #[arg(long = "subnet-id", required = true)]
        subnet_ids: Vec<String>,

        /// Security group id, repeatable
        #[arg(long = "security-group-id")]
        security_group_ids: Vec<String>,

        /// Command override
        #[arg(last = true)]
        command: Vec<String>,
    },

    /// Stop the tasks of a group
    Stop {
        /// Task group name
        group: String,

        /// Only these task ids
        #[arg(long = "task")]
        tasks: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ServiceCommand {
    /// List the tasks of a service
    Ps {
        /// Service name
        service: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Error: could not initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::new(cli.cluster, cli.endpoint, &cli.region, cli.timeout_secs);
    let transport = Arc::new(HttpTransport::new(&config.endpoint, config.timeout)?);
    debug!(cluster = %config.cluster, endpoint = %transport.endpoint(), "Resolved configuration");

    let client: Client = TaskClient::new(
        config.cluster.clone(),
        transport.clone(),
        CachedDefinitions::new(transport),
    );

    match cli.command {
        Commands::Task(TaskCommand::List) => {
            let groups = client.list_task_groups().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else if groups.is_empty() {
                println!("No task groups found");
            } else {
                print!("{}", output::groups_table(&groups));
            }
        }
        Commands::Task(TaskCommand::Ps { group }) => {
            let tasks = client.list_tasks_for_group(&group).await?;
            print_tasks(&tasks, cli.json)?;
        }
        Commands::Task(TaskCommand::Info { group, tasks }) => {
            let found = select(client.list_tasks_for_group(&group).await?, &tasks);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else if found.is_empty() {
                println!("No tasks found");
            } else {
                print!("{}", output::task_details(&found, Utc::now()));
            }
        }
        Commands::Task(TaskCommand::Run {
            group,
            task_definition,
            num,
            env_vars,
            subnet_ids,
            security_group_ids,
            command,
        }) => {
            let input = RunTaskInput {
                cluster_name: config.cluster.clone(),
                count: num,
                command,
                env_vars,
                security_group_ids,
                subnet_ids,
                task_definition_arn: task_definition,
                task_name: group.clone(),
            };
            client.run_task(&input).await?;
            println!(
                "Running {num} task(s) in group {group} on cluster {}",
                client.cluster()
            );
        }
        Commands::Task(TaskCommand::Stop { group, tasks }) => {
            stop_group(&client, &group, tasks).await?;
        }
        Commands::Service(ServiceCommand::Ps { service }) => {
            let tasks = client.list_tasks_for_service(&service).await?;
            print_tasks(&tasks, cli.json)?;
        }
    }

    Ok(())
}

async fn stop_group(
    client: &Client,
    group: &str,
    task_ids: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let task_ids = if task_ids.is_empty() {
        client
            .list_tasks_for_group(group)
            .await?
            .into_iter()
            .map(|t| t.task_id.into_inner())
            .collect()
    } else {
        task_ids
    };

    if task_ids.is_empty() {
        println!("No tasks found in group {group} on cluster {}", client.cluster());
        return Ok(());
    }

    client.stop_tasks(&task_ids).await?;
    println!(
        "Stopped {} task(s) in group {group} on cluster {}",
        task_ids.len(),
        client.cluster()
    );

    Ok(())
}

fn print_tasks(tasks: &[Task], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
    } else if tasks.is_empty() {
        println!("No tasks found");
    } else {
        print!("{}", output::tasks_table(tasks, Utc::now()));
    }
    Ok(())
}

/// Keep only the requested ids; no ids keeps everything.
fn select(tasks: Vec<Task>, task_ids: &[String]) -> Vec<Task> {
    if task_ids.is_empty() {
        return tasks;
    }
    tasks
        .into_iter()
        .filter(|t| task_ids.iter().any(|id| id == t.task_id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecsctl_core::TaskId;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "ecsctl",
            "--cluster",
            "prod",
            "task",
            "run",
            "web",
            "-d",
            "web:3",
            "--num",
            "2",
            "--env",
            "A=1",
            "--env",
            "B=x=y",
            "--subnet-id",
            "subnet-1",
            "--",
            "rake",
            "db:migrate",
        ])
        .unwrap();

        assert_eq!(cli.cluster, "prod");
        match cli.command {
            Commands::Task(TaskCommand::Run {
                group,
                task_definition,
                num,
                env_vars,
                subnet_ids,
                command,
                ..
            }) => {
                assert_eq!(group, "web");
                assert_eq!(task_definition, "web:3");
                assert_eq!(num, 2);
                assert_eq!(env_vars, vec![EnvVar::new("A", "1"), EnvVar::new("B", "x=y")]);
                assert_eq!(subnet_ids, vec!["subnet-1"]);
                assert_eq!(command, vec!["rake", "db:migrate"]);
            }
            _ => panic!("expected task run"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_env() {
        let result = Cli::try_parse_from([
            "ecsctl",
            "task",
            "run",
            "web",
            "-d",
            "web:3",
            "--subnet-id",
            "subnet-1",
            "--env",
            "NOVALUE",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_stop_with_tasks() {
        let cli = Cli::try_parse_from(["ecsctl", "task", "stop", "web", "--task", "a", "--task", "b"])
            .unwrap();

        match cli.command {
            Commands::Task(TaskCommand::Stop { group, tasks }) => {
                assert_eq!(group, "web");
                assert_eq!(tasks, vec!["a", "b"]);
            }
            _ => panic!("expected task stop"),
        }
    }

    #[test]
    fn test_select() {
        let tasks = vec![
            Task {
                task_id: TaskId::new("a"),
                ..Task::default()
            },
            Task {
                task_id: TaskId::new("b"),
                ..Task::default()
            },
        ];

        assert_eq!(select(tasks.clone(), &[]).len(), 2);

        let picked = select(tasks, &["b".to_string()]);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].task_id, TaskId::new("b"));
    }
}
