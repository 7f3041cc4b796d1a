//! Listing filter for tasks.

use super::{Task, TaskStatus};
use chrono::NaiveDate;

/// Conjunction of optional listing conditions.
///
/// An absent condition matches every task. The due-date condition compares
/// calendar days and never matches a task without a due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    due_date: Option<NaiveDate>,
}

impl TaskFilter {
    /// Creates a filter from optional conditions.
    #[must_use]
    pub const fn new(status: Option<TaskStatus>, due_date: Option<NaiveDate>) -> Self {
        Self { status, due_date }
    }

    /// Restricts matches to tasks with `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts matches to tasks due on `due_date`.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the status condition, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the due-date condition, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns `true` when `task` satisfies every present condition.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_matches = self.status.is_none_or(|status| task.status() == status);
        let due_date_matches = self
            .due_date
            .is_none_or(|due_date| task.due_date() == Some(due_date));
        status_matches && due_date_matches
    }
}
