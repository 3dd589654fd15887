//! Same-day time-slot conflict detection.
//!
//! A task occupies the half-open window `[start_time, end_time)` on its
//! due date. Two tasks conflict when their windows overlap on the same
//! date. Tasks with an empty start or end time carry no window: they
//! never conflict and never block others. Times are zero-padded `HH:MM`
//! strings, so lexicographic order equals chronological order.

use crate::task::Task;

/// Returns true when `candidate` overlaps another task's window on the
/// same due date.
///
/// Tasks are compared by identifier, never by position, so a candidate
/// carrying an existing id (an update) is not checked against its own
/// stored version. Pure and side-effect free.
#[must_use]
pub fn has_conflict(existing: &[Task], candidate: &Task) -> bool {
    if !candidate.has_time_window() {
        return false;
    }
    existing.iter().any(|task| {
        task.due_date == candidate.due_date
            && task.id != candidate.id
            && task.has_time_window()
            && windows_overlap(task, candidate)
    })
}

/// Overlap test for two tasks that both declare windows.
///
/// Holds when the candidate starts inside `[task.start, task.end)`, ends
/// inside `(task.start, task.end]`, or fully contains the task's window.
fn windows_overlap(task: &Task, candidate: &Task) -> bool {
    let starts_inside =
        candidate.start_time >= task.start_time && candidate.start_time < task.end_time;
    let ends_inside = candidate.end_time > task.start_time && candidate.end_time <= task.end_time;
    let contains = candidate.start_time <= task.start_time && candidate.end_time >= task.end_time;
    starts_inside || ends_inside || contains
}
