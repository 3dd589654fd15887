//! Task record types for `SlotPlan`.
//!
//! Defines the [`Task`] record held by the store and persisted as JSON,
//! its enumerated status and priority fields, and the [`TaskId`]
//! identifier. Serialized field names are camelCase to match the
//! persisted collection layout.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum allowed task name length in characters.
pub const MAX_NAME_LENGTH: usize = 150;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Error returned when parsing a status or priority from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFieldError {
    /// The string is not a recognized task status.
    #[error("unknown status {0:?} (expected new, pending, in-progress, or completed)")]
    Status(String),
    /// The string is not a recognized task priority.
    #[error("unknown priority {0:?} (expected low, medium, or high)")]
    Priority(String),
}

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has just been created.
    New,
    /// Task is waiting on something before work can start.
    Pending,
    /// Task is actively being worked on.
    InProgress,
    /// Task has been completed.
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseFieldError::Status(s.to_string())),
        }
    }
}

/// Scheduling priority of a task.
///
/// Serialized with capitalized variant names (`"Low"`, `"Medium"`,
/// `"High"`), matching the persisted collection layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Can slip without consequence.
    Low,
    /// Normal scheduling weight.
    Medium,
    /// Should win when slots are contested.
    High,
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseFieldError::Priority(s.to_string())),
        }
    }
}

/// A scheduled task record.
///
/// `start_time` and `end_time` are zero-padded 24-hour `HH:MM` strings,
/// or empty when the task has no time window. They stay strings because
/// the conflict detector is defined over lexicographic comparison of
/// fixed-width clock values. `created_at` is set once at creation;
/// `updated_at` advances on every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier, immutable after creation.
    pub id: TaskId,
    /// Short task name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Calendar date the task is scheduled on.
    pub due_date: NaiveDate,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Who the task is assigned to.
    pub assignee: String,
    /// Window start (`HH:MM`), or empty for no window.
    pub start_time: String,
    /// Window end (`HH:MM`), or empty for no window.
    pub end_time: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether this task declares a complete time window.
    ///
    /// Tasks without a window never participate in conflict detection,
    /// in either role.
    #[must_use]
    pub fn has_time_window(&self) -> bool {
        !self.start_time.is_empty() && !self.end_time.is_empty()
    }
}

/// A candidate task as submitted by a caller.
///
/// Drafts carry no identifier or timestamps; the store assigns those.
/// An update preserves the stored record's `created_at`, so creation
/// time cannot be rewritten through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Short task name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Calendar date the task is scheduled on.
    pub due_date: NaiveDate,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Who the task is assigned to.
    pub assignee: String,
    /// Window start (`HH:MM`), or empty for no window.
    pub start_time: String,
    /// Window end (`HH:MM`), or empty for no window.
    pub end_time: String,
}
