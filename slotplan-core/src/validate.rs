//! Candidate validation, run before a draft reaches the store.
//!
//! Structural and semantic rules for [`TaskDraft`]: required fields, the
//! name length cap, clock-time format, and window ordering. The store
//! assumes drafts have already passed here; conflict detection is a
//! separate concern and never runs inside validation.

use chrono::NaiveTime;
use thiserror::Error;

use crate::task::{MAX_NAME_LENGTH, TaskDraft};

/// Errors that can occur when validating a task draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Task name cannot be empty.
    #[error("task name cannot be empty")]
    NameEmpty,
    /// Task name exceeds the maximum length.
    #[error("task name too long (max 150 characters)")]
    NameTooLong,
    /// Description cannot be empty.
    #[error("description cannot be empty")]
    DescriptionEmpty,
    /// Assignee cannot be empty.
    #[error("assignee cannot be empty")]
    AssigneeEmpty,
    /// Start time is not a valid `HH:MM` clock value.
    #[error("invalid start time {0:?}: expected zero-padded HH:MM")]
    BadStartTime(String),
    /// End time is not a valid `HH:MM` clock value.
    #[error("invalid end time {0:?}: expected zero-padded HH:MM")]
    BadEndTime(String),
    /// End time does not come after start time.
    #[error("end time must be after start time")]
    WindowInverted,
}

/// Validates a candidate task draft.
///
/// An empty `start_time` or `end_time` is allowed and opts the task out
/// of conflict checking; a non-empty one must be a zero-padded 24-hour
/// `HH:MM` value. When both ends are present the window must be
/// non-empty (`start < end`).
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered, checking fields in
/// declaration order.
pub fn validate(draft: &TaskDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if draft.name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    if draft.description.trim().is_empty() {
        return Err(ValidationError::DescriptionEmpty);
    }
    if draft.assignee.trim().is_empty() {
        return Err(ValidationError::AssigneeEmpty);
    }
    if !draft.start_time.is_empty() && !is_clock_time(&draft.start_time) {
        return Err(ValidationError::BadStartTime(draft.start_time.clone()));
    }
    if !draft.end_time.is_empty() && !is_clock_time(&draft.end_time) {
        return Err(ValidationError::BadEndTime(draft.end_time.clone()));
    }
    if !draft.start_time.is_empty()
        && !draft.end_time.is_empty()
        && draft.start_time >= draft.end_time
    {
        return Err(ValidationError::WindowInverted);
    }
    Ok(())
}

/// Whether `value` is a zero-padded 24-hour `HH:MM` clock time.
///
/// The length check rejects unpadded values like `"9:00"`, which chrono
/// would accept but which break lexicographic ordering.
fn is_clock_time(value: &str) -> bool {
    value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok()
}
