//! Task collection state container with conflict-gated mutations.
//!
//! [`TaskStore`] owns the ordered task collection and the transient
//! conflict-error message, and delegates to the conflict detector before
//! any mutation. Every successful mutation is persisted to the injected
//! [`KvStorage`] backend; persistence is best-effort, so a write failure
//! is logged and the collection keeps operating in memory.
//!
//! A single mutation attempt moves `Idle -> Validating -> Rejected |
//! Applied`: a rejection changes nothing but the error field, an applied
//! mutation commits, clears the error field, and persists.

use chrono::Utc;
use thiserror::Error;

use slotplan_core::conflict::has_conflict;
use slotplan_core::task::{Task, TaskDraft, TaskId};

use crate::storage::KvStorage;

/// Storage key under which the task collection is persisted.
pub const TASKS_KEY: &str = "tasks";

/// Message retained on the store when a mutation is rejected for overlap.
pub const CONFLICT_MESSAGE: &str =
    "Time slot conflict: This time slot overlaps with an existing task";

/// Errors surfaced to callers of store mutations.
///
/// Storage failures are deliberately absent: persistence is best-effort
/// and never fails a mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The candidate's time window overlaps another task on the same date.
    #[error("time slot conflict: this time slot overlaps with an existing task")]
    Conflict,
    /// Update targeted an identifier absent from the collection.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// State container for the task collection.
///
/// Holds tasks in insertion order plus the conflict-error message from
/// the most recent rejected mutation. Single-threaded by design: there
/// are no concurrent writers, so the check-then-act sequence in
/// [`add`](Self::add) and [`update`](Self::update) is race-free.
pub struct TaskStore<S: KvStorage> {
    tasks: Vec<Task>,
    conflict_error: Option<String>,
    storage: S,
}

impl<S: KvStorage> TaskStore<S> {
    /// Hydrates a store from the given storage backend.
    ///
    /// Missing data, a read failure, or malformed JSON all degrade to an
    /// empty collection with a logged warning; startup never fails on
    /// bad persisted state.
    #[must_use]
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Task>>(&raw) {
                Ok(tasks) => tasks,
                Err(err) => {
                    tracing::warn!(error = %err, "malformed task data in storage, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read task storage, starting empty");
                Vec::new()
            }
        };
        Self {
            tasks,
            conflict_error: None,
            storage,
        }
    }

    /// Adds a new task built from `draft`.
    ///
    /// Assigns a fresh identifier and sets both timestamps to now. The
    /// draft is assumed validated; only the same-day overlap check runs
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] when the draft's window overlaps
    /// an existing same-day task. The collection is left unchanged and
    /// the conflict message is retained on the store.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
            priority: draft.priority,
            assignee: draft.assignee,
            start_time: draft.start_time,
            end_time: draft.end_time,
            created_at: now,
            updated_at: now,
        };
        if has_conflict(&self.tasks, &task) {
            self.conflict_error = Some(CONFLICT_MESSAGE.to_string());
            return Err(StoreError::Conflict);
        }
        self.conflict_error = None;
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Replaces the task with identifier `id` by a record built from
    /// `draft`.
    ///
    /// The stored record's `created_at` is preserved; `updated_at` is set
    /// to now. Self-exclusion in the conflict check means keeping the
    /// task's own window is never a conflict. Replacement is in place, so
    /// insertion order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no task has `id` (the
    /// conflict-error field is left untouched), or
    /// [`StoreError::Conflict`] when the new window overlaps another
    /// same-day task.
    pub fn update(&mut self, id: &TaskId, draft: TaskDraft) -> Result<Task, StoreError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == *id) else {
            return Err(StoreError::NotFound(id.clone()));
        };
        let task = Task {
            id: id.clone(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
            priority: draft.priority,
            assignee: draft.assignee,
            start_time: draft.start_time,
            end_time: draft.end_time,
            created_at: self.tasks[index].created_at,
            updated_at: Utc::now(),
        };
        if has_conflict(&self.tasks, &task) {
            self.conflict_error = Some(CONFLICT_MESSAGE.to_string());
            return Err(StoreError::Conflict);
        }
        self.conflict_error = None;
        self.tasks[index] = task.clone();
        self.persist();
        Ok(task)
    }

    /// Removes the task with identifier `id`, if present.
    ///
    /// Idempotent: deleting an absent identifier is not an error. Any
    /// delete clears the conflict-error field and persists. Returns
    /// whether a record was actually removed.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != *id);
        let removed = self.tasks.len() != before;
        self.conflict_error = None;
        self.persist();
        removed
    }

    /// Clears the retained conflict-error message; no other effect.
    pub fn clear_conflict_error(&mut self) {
        self.conflict_error = None;
    }

    /// All tasks, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The task with identifier `id`, if present.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == *id)
    }

    /// The conflict message from the most recent rejected mutation, if
    /// one has not been cleared since.
    #[must_use]
    pub fn conflict_error(&self) -> Option<&str> {
        self.conflict_error.as_deref()
    }

    /// Serializes the full collection and writes it to storage.
    ///
    /// Failures are logged and swallowed — the collection keeps operating
    /// in memory and the caller's mutation still succeeds.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.tasks) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "could not serialize tasks, skipping persist");
                return;
            }
        };
        if let Err(err) = self.storage.set(TASKS_KEY, &json) {
            tracing::warn!(error = %err, "task persist failed, collection continues in memory");
        }
    }
}
