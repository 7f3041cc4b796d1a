//! Unit-of-work port exposing the task repository.

use crate::persistence::ports::{Repository, UnitOfWork, UnitOfWorkFactory};
use crate::task::domain::Task;

/// Repository bound to the [`Task`] entity.
pub trait TaskRepository: Repository<Task> {}

impl<R: Repository<Task>> TaskRepository for R {}

/// Unit of work owning the task repository.
///
/// Changes queued on [`TaskUnitOfWork::tasks`] reach storage only through
/// [`UnitOfWork::commit`].
pub trait TaskUnitOfWork: UnitOfWork {
    /// Task repository type.
    type Tasks: TaskRepository;

    /// Returns the task repository owned by this unit of work.
    fn tasks(&mut self) -> &mut Self::Tasks;
}

/// Storage backend that opens task units of work.
pub trait TaskStore: UnitOfWorkFactory<UnitOfWork: TaskUnitOfWork> {}

impl<F> TaskStore for F where F: UnitOfWorkFactory<UnitOfWork: TaskUnitOfWork> {}
