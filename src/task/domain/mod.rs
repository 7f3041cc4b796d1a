//! Domain model for task tracking.
//!
//! Tasks are created pending, revised in place, and selected for listing
//! through a [`TaskFilter`]. Identifiers are assigned by storage, so a task
//! exists as a [`TaskDraft`] until its first commit.

mod error;
mod filter;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::{TaskId, TaskTitle};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskStatus};
