//! Core domain definitions for `SlotPlan` task scheduling.

pub mod conflict;
pub mod task;
pub mod validate;
