//! Integration tests for the task store lifecycle.
//!
//! Walks the store through realistic add/update/delete flows against an
//! in-memory backend, covering the conflict-rejection scenarios and the
//! conflict-error lifecycle end to end.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use slotplan::storage::MemoryStorage;
use slotplan::store::{CONFLICT_MESSAGE, StoreError, TaskStore};
use slotplan_core::task::{TaskDraft, TaskId, TaskPriority, TaskStatus};
use slotplan_core::validate::{ValidationError, validate};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Creates a draft on `date` with the given window.
fn make_draft(name: &str, date: &str, start: &str, end: &str) -> TaskDraft {
    TaskDraft {
        name: name.to_string(),
        description: format!("{name} description"),
        status: TaskStatus::New,
        due_date: date.parse().expect("valid date"),
        priority: TaskPriority::Medium,
        assignee: "sam".to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

fn make_store() -> TaskStore<MemoryStorage> {
    TaskStore::load(MemoryStorage::new())
}

// ---------------------------------------------------------------------------
// Booking scenarios
// ---------------------------------------------------------------------------

#[test]
fn first_booking_on_a_date_succeeds() {
    let mut store = make_store();
    store
        .add(make_draft("Standup", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    assert_eq!(store.tasks().len(), 1);
    assert!(store.conflict_error().is_none());
}

#[test]
fn overlapping_booking_is_rejected_and_retained() {
    let mut store = make_store();
    store
        .add(make_draft("Standup", "2024-01-01", "09:00", "10:00"))
        .expect("add");

    let err = store
        .add(make_draft("Review", "2024-01-01", "09:30", "10:30"))
        .expect_err("overlap");
    assert_eq!(err, StoreError::Conflict);
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.conflict_error(), Some(CONFLICT_MESSAGE));
}

#[test]
fn same_window_on_another_date_succeeds() {
    let mut store = make_store();
    store
        .add(make_draft("Standup", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    store
        .add(make_draft("Standup", "2024-01-02", "09:00", "10:00"))
        .expect("add");
    assert_eq!(store.tasks().len(), 2);
    assert!(store.conflict_error().is_none());
}

#[test]
fn editing_only_the_description_keeps_the_slot() {
    let mut store = make_store();
    let task = store
        .add(make_draft("Standup", "2024-01-01", "09:00", "10:00"))
        .expect("add");

    let mut draft = make_draft("Standup", "2024-01-01", "09:00", "10:00");
    draft.description = "new agenda".to_string();
    let updated = store.update(&task.id, draft).expect("self update");

    assert_eq!(updated.id, task.id);
    assert_eq!(updated.description, "new agenda");
    assert_eq!(updated.created_at, task.created_at);
    assert!(store.conflict_error().is_none());
}

#[test]
fn windowless_task_books_regardless_of_existing_slots() {
    let mut store = make_store();
    store
        .add(make_draft("Standup", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    store
        .add(make_draft("Notes", "2024-01-01", "", ""))
        .expect("windowless add");
    assert_eq!(store.tasks().len(), 2);
}

// ---------------------------------------------------------------------------
// Conflict-error lifecycle
// ---------------------------------------------------------------------------

#[test]
fn error_clears_on_next_successful_mutation() {
    let mut store = make_store();
    store
        .add(make_draft("A", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    let _ = store.add(make_draft("B", "2024-01-01", "09:00", "10:00"));
    assert!(store.conflict_error().is_some());

    store
        .add(make_draft("B", "2024-01-01", "10:00", "11:00"))
        .expect("non-overlapping retry");
    assert!(store.conflict_error().is_none());
}

#[test]
fn error_clears_on_delete_even_of_unrelated_task() {
    let mut store = make_store();
    let a = store
        .add(make_draft("A", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    let _ = store.add(make_draft("B", "2024-01-01", "09:00", "10:00"));
    assert!(store.conflict_error().is_some());

    store.delete(&a.id);
    assert!(store.conflict_error().is_none());
}

#[test]
fn error_clears_on_explicit_request() {
    let mut store = make_store();
    store
        .add(make_draft("A", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    let _ = store.add(make_draft("B", "2024-01-01", "09:00", "10:00"));
    store.clear_conflict_error();
    assert!(store.conflict_error().is_none());
    assert_eq!(store.tasks().len(), 1);
}

// ---------------------------------------------------------------------------
// Update and delete edges
// ---------------------------------------------------------------------------

#[test]
fn moving_a_task_onto_an_occupied_slot_is_rejected() {
    let mut store = make_store();
    store
        .add(make_draft("A", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    let b = store
        .add(make_draft("B", "2024-01-01", "13:00", "14:00"))
        .expect("add");

    let err = store
        .update(&b.id, make_draft("B", "2024-01-01", "09:30", "10:30"))
        .expect_err("overlap");
    assert_eq!(err, StoreError::Conflict);

    // B keeps its original slot after the rejection.
    let kept = store.task(&b.id).expect("present");
    assert_eq!((kept.start_time.as_str(), kept.end_time.as_str()), ("13:00", "14:00"));
}

#[test]
fn updating_unknown_id_reports_not_found() {
    let mut store = make_store();
    let ghost = TaskId::new();
    let err = store
        .update(&ghost, make_draft("Ghost", "2024-01-01", "09:00", "10:00"))
        .expect_err("not found");
    assert_eq!(err, StoreError::NotFound(ghost));
}

#[test]
fn deleting_twice_is_harmless() {
    let mut store = make_store();
    let task = store
        .add(make_draft("A", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    assert!(store.delete(&task.id));
    assert!(!store.delete(&task.id));
    assert!(store.tasks().is_empty());
    assert!(store.conflict_error().is_none());
}

#[test]
fn deleting_a_task_frees_its_slot_for_rebooking() {
    let mut store = make_store();
    let task = store
        .add(make_draft("A", "2024-01-01", "09:00", "10:00"))
        .expect("add");
    store.delete(&task.id);
    store
        .add(make_draft("Replacement", "2024-01-01", "09:00", "10:00"))
        .expect("rebooking");
    assert_eq!(store.tasks().len(), 1);
}

// ---------------------------------------------------------------------------
// Validation runs before the store is consulted
// ---------------------------------------------------------------------------

#[test]
fn invalid_draft_never_reaches_the_store() {
    let mut store = make_store();
    let mut draft = make_draft("A", "2024-01-01", "10:00", "09:00");
    draft.name = String::new();

    let err = validate(&draft).expect_err("invalid");
    assert_eq!(err, ValidationError::NameEmpty);

    // The caller stops on validation failure; the store saw nothing.
    assert!(store.tasks().is_empty());
    assert!(store.conflict_error().is_none());
    store
        .add(make_draft("A", "2024-01-01", "09:00", "10:00"))
        .expect("store still usable");
}

#[test]
fn validated_one_sided_window_is_accepted_and_never_blocks() {
    let mut store = make_store();
    let draft = make_draft("A", "2024-01-01", "09:00", "");
    validate(&draft).expect("one-sided window is valid");
    store.add(draft).expect("add");

    store
        .add(make_draft("B", "2024-01-01", "09:00", "10:00"))
        .expect("one-sided window does not block");
    assert_eq!(store.tasks().len(), 2);
}
