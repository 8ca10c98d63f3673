//! Advisory checks a host runs before handing data to the layout pass or
//! before accepting an edit. The layout pass never calls these.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::graph;
use crate::model::{Row, Task, TaskMap};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task ID is required")]
    MissingId,

    #[error("Task title is required")]
    MissingTitle,

    #[error("Row ID is required")]
    MissingRowId,

    #[error("Start date {start} must not be after end date {end}")]
    InvalidDateRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Progress must be between 0 and 100 (got {0})")]
    ProgressOutOfRange(i64),

    #[error("Row label is required")]
    MissingLabel,

    #[error("Task '{task}' cannot depend on '{dependency}': it would create a cycle")]
    CyclicDependency { task: String, dependency: String },
}

/// All problems with a task record, empty when it is fit for layout.
pub fn validate_task(task: &Task) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if task.id.trim().is_empty() {
        errors.push(ValidationError::MissingId);
    }
    if task.title.trim().is_empty() {
        errors.push(ValidationError::MissingTitle);
    }
    if task.row_id.trim().is_empty() {
        errors.push(ValidationError::MissingRowId);
    }
    if !is_valid_date_range(task.start, task.end) {
        errors.push(ValidationError::InvalidDateRange {
            start: task.start,
            end: task.end,
        });
    }
    if !(0..=100).contains(&task.progress) {
        errors.push(ValidationError::ProgressOutOfRange(task.progress));
    }
    errors
}

pub fn validate_row(row: &Row) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if row.id.trim().is_empty() {
        errors.push(ValidationError::MissingRowId);
    }
    if row.label.trim().is_empty() {
        errors.push(ValidationError::MissingLabel);
    }
    errors
}

pub fn is_valid_date_range(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start <= end
}

/// Inclusive overlap of the two tasks' spans.
pub fn tasks_overlap(a: &Task, b: &Task) -> bool {
    a.start <= b.end && a.end >= b.start
}

/// Gate for adding `dependency` to `task_id`'s dependency list.
pub fn check_dependency(
    task_id: &str,
    dependency: &str,
    tasks: &TaskMap,
) -> Result<(), ValidationError> {
    if graph::has_cycle(task_id, dependency, tasks) {
        return Err(ValidationError::CyclicDependency {
            task: task_id.to_string(),
            dependency: dependency.to_string(),
        });
    }
    Ok(())
}
