//! Service layer applying task business rules over a unit of work.

use crate::persistence::ports::{Repository, RepositoryError, UnitOfWork};
use crate::task::{
    domain::{
        ParseTaskStatusError, Task, TaskDomainError, TaskDraft, TaskFilter, TaskId, TaskStatus,
        TaskTitle,
    },
    ports::TaskUnitOfWork,
};
use chrono::NaiveDate;
use thiserror::Error;

/// Field values supplied when creating or updating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    title: String,
    description: String,
    status: Result<TaskStatus, ParseTaskStatusError>,
    due_date: Option<NaiveDate>,
}

impl TaskInput {
    /// Creates input with a title, an empty description, pending status,
    /// and no due date.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: Ok(TaskStatus::Pending),
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status. Ignored on creation.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Ok(status);
        self
    }

    /// Sets the status from its numeric wire code.
    ///
    /// An unknown code is kept as given and only rejected when an update
    /// applies it; creation ignores it like any other status.
    #[must_use]
    pub fn with_status_code(mut self, code: i64) -> Self {
        self.status = u8::try_from(code)
            .map_err(|_| ParseTaskStatusError(code.to_string()))
            .and_then(TaskStatus::try_from);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Returns the requested title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the requested status, or `None` for an unknown code.
    #[must_use]
    pub fn status(&self) -> Option<TaskStatus> {
        self.status.as_ref().ok().copied()
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository or commit failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task business rules over one unit of work.
///
/// A service is built for a single logical operation; the unit of work and
/// its storage session are released when the service is dropped.
#[derive(Debug)]
pub struct TaskService<U: TaskUnitOfWork> {
    unit_of_work: U,
}

impl<U: TaskUnitOfWork> TaskService<U> {
    /// Creates a service over `unit_of_work`.
    #[must_use]
    pub const fn new(unit_of_work: U) -> Self {
        Self { unit_of_work }
    }

    /// Returns the owned unit of work.
    #[must_use]
    pub fn into_unit_of_work(self) -> U {
        self.unit_of_work
    }

    /// Creates a task and returns it with its storage-assigned identifier.
    ///
    /// The task always starts as [`TaskStatus::Pending`]; the status carried
    /// by `input` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an empty title and
    /// [`TaskServiceError::Repository`] when the commit fails.
    pub async fn create(&mut self, input: TaskInput) -> TaskServiceResult<Task> {
        let TaskInput {
            title,
            description,
            status: requested_status,
            due_date,
        } = input;
        let draft = TaskDraft::new(TaskTitle::new(title)?, description, due_date);

        let staged = self.unit_of_work.tasks().add(draft);
        let ticket = staged.ticket();
        self.unit_of_work.commit().await?;
        let task = self
            .unit_of_work
            .tasks()
            .take_persisted(staged)
            .ok_or(RepositoryError::UnresolvedInsert(ticket))?;

        tracing::info!(
            task_id = %task.id(),
            ignored_status = ?requested_status,
            "created task"
        );
        Ok(task)
    }

    /// Lists tasks matching every supplied condition.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the query fails.
    pub async fn list(
        &mut self,
        status: Option<TaskStatus>,
        due_date: Option<NaiveDate>,
    ) -> TaskServiceResult<Vec<Task>> {
        let filter = TaskFilter::new(status, due_date);
        let tasks = self.unit_of_work.tasks().find(&filter).await?;
        tracing::debug!(?status, ?due_date, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_by_id(&mut self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.unit_of_work.tasks().get_by_id(id).await?)
    }

    /// Replaces title, description, status, and due date of a task.
    ///
    /// A missing task is left alone whatever the input holds: nothing is
    /// validated, queued, or committed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an empty title or unknown
    /// status code on an existing task, and [`TaskServiceError::Repository`]
    /// when the lookup or commit fails.
    pub async fn update(&mut self, id: TaskId, input: TaskInput) -> TaskServiceResult<()> {
        let Some(mut task) = self.unit_of_work.tasks().get_by_id(id).await? else {
            tracing::debug!(task_id = %id, "update skipped, task not found");
            return Ok(());
        };

        let TaskInput {
            title,
            description,
            status,
            due_date,
        } = input;
        let validated_title = TaskTitle::new(title)?;
        let validated_status = status.map_err(TaskDomainError::InvalidStatus)?;

        task.revise(validated_title, description, validated_status, due_date);
        self.unit_of_work.tasks().update(task);
        let affected = self.unit_of_work.commit().await?;
        tracing::info!(task_id = %id, status = ?validated_status, affected, "updated task");
        Ok(())
    }

    /// Deletes a task.
    ///
    /// A missing task is left alone: nothing is queued and nothing is
    /// committed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup or commit
    /// fails.
    pub async fn delete(&mut self, id: TaskId) -> TaskServiceResult<()> {
        let Some(task) = self.unit_of_work.tasks().get_by_id(id).await? else {
            tracing::debug!(task_id = %id, "delete skipped, task not found");
            return Ok(());
        };

        self.unit_of_work.tasks().delete(&task);
        let affected = self.unit_of_work.commit().await?;
        tracing::info!(task_id = %id, affected, "deleted task");
        Ok(())
    }
}
