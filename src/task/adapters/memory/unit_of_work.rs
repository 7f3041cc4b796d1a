//! Ephemeral task store for tests and single-process deployments.

use crate::persistence::{
    adapters::memory::{InMemoryRepository, MemoryTable},
    ports::{Repository, RepositoryResult, UnitOfWork, UnitOfWorkFactory},
};
use crate::task::{domain::Task, ports::TaskUnitOfWork};
use async_trait::async_trait;

/// Process-wide in-memory task storage.
///
/// Clones share the same table, so every unit of work opened from any clone
/// sees the same tasks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: MemoryTable<Task>,
}

impl InMemoryTaskStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryTaskStore {
    type UnitOfWork = InMemoryTaskUnitOfWork;

    async fn begin(&self) -> RepositoryResult<InMemoryTaskUnitOfWork> {
        Ok(InMemoryTaskUnitOfWork {
            tasks: InMemoryRepository::new(self.tasks.clone()),
        })
    }
}

/// Unit of work over an [`InMemoryTaskStore`].
#[derive(Debug)]
pub struct InMemoryTaskUnitOfWork {
    tasks: InMemoryRepository<Task>,
}

#[async_trait]
impl UnitOfWork for InMemoryTaskUnitOfWork {
    async fn commit(&mut self) -> RepositoryResult<usize> {
        let queued = self.tasks.pending();
        let affected = self.tasks.flush()?;
        tracing::debug!(queued, affected, "committed in-memory unit of work");
        Ok(affected)
    }
}

impl TaskUnitOfWork for InMemoryTaskUnitOfWork {
    type Tasks = InMemoryRepository<Task>;

    fn tasks(&mut self) -> &mut Self::Tasks {
        &mut self.tasks
    }
}
