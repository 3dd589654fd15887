//! `SlotPlan` — time-slot task planner.
//!
//! Tasks carry a due date and an optional `HH:MM` time window; two tasks
//! on the same date may not overlap. The collection is persisted as JSON
//! in the platform data directory. Configuration via CLI flags,
//! environment variables, or config file
//! (`~/.config/slotplan/config.toml`).
//!
//! ```bash
//! # Book a slot
//! slotplan add --name "Sprint review" --description "Walk the board" \
//!     --assignee priya --date 2024-01-01 --start 09:00 --end 10:00
//!
//! # A windowless task never conflicts
//! slotplan add --name "Write notes" --description "Afterwards" \
//!     --assignee priya --date 2024-01-01
//!
//! slotplan list --date 2024-01-01
//! slotplan edit <id> --status in-progress
//! slotplan delete <id>
//! ```

use std::path::Path;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use slotplan::config::{AppConfig, CliArgs};
use slotplan::storage::FileStorage;
use slotplan::store::{CONFLICT_MESSAGE, StoreError, TaskStore};
use slotplan_core::task::{Task, TaskDraft, TaskId, TaskPriority, TaskStatus};
use slotplan_core::validate::{ValidationError, validate};

/// Top-level CLI: global options plus one subcommand.
#[derive(clap::Parser, Debug)]
#[command(version, about = "Time-slot task planner with conflict-checked scheduling")]
struct Cli {
    #[command(flatten)]
    global: CliArgs,

    #[command(subcommand)]
    command: Command,
}

/// Task operations exposed on the command line.
#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Create a new task.
    Add {
        /// Task name.
        #[arg(long)]
        name: String,
        /// Free-text description.
        #[arg(long)]
        description: String,
        /// Due date (`YYYY-MM-DD`).
        #[arg(long)]
        date: NaiveDate,
        /// Workflow status: new, pending, in-progress, or completed.
        #[arg(long, default_value = "new")]
        status: TaskStatus,
        /// Priority: low, medium, or high.
        #[arg(long, default_value = "low")]
        priority: TaskPriority,
        /// Who the task is assigned to.
        #[arg(long)]
        assignee: String,
        /// Window start (`HH:MM`); omit for no window.
        #[arg(long, default_value = "")]
        start: String,
        /// Window end (`HH:MM`); omit for no window.
        #[arg(long, default_value = "")]
        end: String,
    },
    /// List tasks, optionally restricted to one date.
    List {
        /// Only show tasks due on this date.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show every field of one task.
    Show {
        /// Task identifier.
        id: TaskId,
    },
    /// Edit fields of an existing task; unset flags keep current values.
    Edit {
        /// Task identifier.
        id: TaskId,
        /// New task name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New due date (`YYYY-MM-DD`).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// New status.
        #[arg(long)]
        status: Option<TaskStatus>,
        /// New priority.
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// New assignee.
        #[arg(long)]
        assignee: Option<String>,
        /// New window start; pass an empty string to drop the window.
        #[arg(long)]
        start: Option<String>,
        /// New window end; pass an empty string to drop the window.
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete a task. Deleting an unknown id is not an error.
    Delete {
        /// Task identifier.
        id: TaskId,
    },
}

/// Errors a subcommand can surface to the user.
#[derive(Debug, thiserror::Error)]
enum CommandError {
    /// The draft failed validation before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The store rejected the mutation; carries the retained message.
    #[error("{0}")]
    Conflict(String),
    /// The store reported a non-conflict failure.
    #[error(transparent)]
    Store(StoreError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.global) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = init_logging(&cli.global.log_level, cli.global.log_file.as_deref());

    tracing::info!(data_dir = %config.data_dir.display(), "slotplan starting");

    let storage = FileStorage::new(config.data_dir.clone());
    let mut store = TaskStore::load(storage);

    match run_command(&mut store, &config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize file-based logging.
///
/// Logs go to a file (stdout belongs to command output). Returns a
/// [`WorkerGuard`] that must be held until exit so buffered entries are
/// flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("slotplan.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Dispatch one subcommand against the hydrated store.
fn run_command<S: slotplan::storage::KvStorage>(
    store: &mut TaskStore<S>,
    config: &AppConfig,
    command: Command,
) -> Result<(), CommandError> {
    match command {
        Command::Add {
            name,
            description,
            date,
            status,
            priority,
            assignee,
            start,
            end,
        } => {
            let draft = TaskDraft {
                name,
                description,
                status,
                due_date: date,
                priority,
                assignee,
                start_time: start,
                end_time: end,
            };
            validate(&draft)?;
            let task = store.add(draft).map_err(|e| lift_store_error(store, e))?;
            println!("Created task {}", task.id);
            Ok(())
        }
        Command::List { date } => {
            let mut rows: Vec<&Task> = store.tasks().iter().collect();
            if let Some(date) = date {
                rows.retain(|t| t.due_date == date);
            }
            rows.sort_by(|a, b| {
                (a.due_date, &a.start_time).cmp(&(b.due_date, &b.start_time))
            });
            if rows.is_empty() {
                println!("No tasks.");
                return Ok(());
            }
            for task in rows {
                println!(
                    "{}  {}  {:<11}  {:<11}  {:<6}  {}  ({})",
                    task.id,
                    task.due_date,
                    format_window(task),
                    task.status.to_string(),
                    task.priority.to_string(),
                    task.name,
                    task.assignee,
                );
            }
            Ok(())
        }
        Command::Show { id } => {
            let task = store
                .task(&id)
                .ok_or(CommandError::Store(StoreError::NotFound(id)))?;
            println!("Task {}", task.id);
            println!("  Name:        {}", task.name);
            println!("  Description: {}", task.description);
            println!("  Status:      {}", task.status);
            println!("  Due date:    {}", task.due_date);
            println!("  Priority:    {}", task.priority);
            println!("  Assignee:    {}", task.assignee);
            println!("  Window:      {}", format_window(task));
            println!(
                "  Created:     {}",
                task.created_at.format(&config.timestamp_format)
            );
            println!(
                "  Updated:     {}",
                task.updated_at.format(&config.timestamp_format)
            );
            Ok(())
        }
        Command::Edit {
            id,
            name,
            description,
            date,
            status,
            priority,
            assignee,
            start,
            end,
        } => {
            let Some(existing) = store.task(&id).cloned() else {
                return Err(CommandError::Store(StoreError::NotFound(id)));
            };
            let draft = TaskDraft {
                name: name.unwrap_or(existing.name),
                description: description.unwrap_or(existing.description),
                status: status.unwrap_or(existing.status),
                due_date: date.unwrap_or(existing.due_date),
                priority: priority.unwrap_or(existing.priority),
                assignee: assignee.unwrap_or(existing.assignee),
                start_time: start.unwrap_or(existing.start_time),
                end_time: end.unwrap_or(existing.end_time),
            };
            validate(&draft)?;
            let task = store
                .update(&id, draft)
                .map_err(|e| lift_store_error(store, e))?;
            println!("Updated task {}", task.id);
            Ok(())
        }
        Command::Delete { id } => {
            if store.delete(&id) {
                println!("Deleted task {id}");
            } else {
                println!("No task {id} — nothing to delete");
            }
            Ok(())
        }
    }
}

/// Converts a store failure into a command error, surfacing the store's
/// retained conflict message verbatim when there is one.
fn lift_store_error<S: slotplan::storage::KvStorage>(
    store: &TaskStore<S>,
    err: StoreError,
) -> CommandError {
    match err {
        StoreError::Conflict => CommandError::Conflict(
            store
                .conflict_error()
                .unwrap_or(CONFLICT_MESSAGE)
                .to_string(),
        ),
        other => CommandError::Store(other),
    }
}

/// Renders a task's time window as `HH:MM-HH:MM`, or `--` when unset.
fn format_window(task: &Task) -> String {
    if task.has_time_window() {
        format!("{}-{}", task.start_time, task.end_time)
    } else {
        "--".to_string()
    }
}
