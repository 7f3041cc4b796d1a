//! Durable task store backed by `PostgreSQL`.

use crate::persistence::{
    adapters::postgres::{PgPool, PgSession, PostgresRepository, flush_changes},
    ports::{Repository, RepositoryError, RepositoryResult, UnitOfWork, UnitOfWorkFactory},
};
use crate::task::{domain::Task, ports::TaskUnitOfWork};
use async_trait::async_trait;
use diesel::connection::{Connection, SimpleConnection};

/// SQL creating the task table when it does not exist yet.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2024-06-01-000000_create_tasks/up.sql");

/// `PostgreSQL` task storage.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the task table if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when no connection is
    /// available or the DDL fails.
    pub async fn ensure_schema(&self) -> RepositoryResult<()> {
        let session = PgSession::open(&self.pool).await?;
        session
            .run(|connection| {
                connection
                    .batch_execute(CREATE_TASKS_SQL)
                    .map_err(RepositoryError::from)
            })
            .await
    }
}

#[async_trait]
impl UnitOfWorkFactory for PostgresTaskStore {
    type UnitOfWork = PostgresTaskUnitOfWork;

    async fn begin(&self) -> RepositoryResult<PostgresTaskUnitOfWork> {
        let session = PgSession::open(&self.pool).await?;
        Ok(PostgresTaskUnitOfWork {
            tasks: PostgresRepository::new(session.clone()),
            session,
        })
    }
}

/// Unit of work holding one pooled connection until dropped.
#[derive(Debug)]
pub struct PostgresTaskUnitOfWork {
    session: PgSession,
    tasks: PostgresRepository<Task>,
}

#[async_trait]
impl UnitOfWork for PostgresTaskUnitOfWork {
    async fn commit(&mut self) -> RepositoryResult<usize> {
        let queued = self.tasks.pending();
        let task_changes = self.tasks.take_changes();
        if task_changes.is_empty() {
            return Ok(0);
        }

        let outcome = self
            .session
            .run(move |connection| {
                connection.transaction::<_, RepositoryError, _>(|transaction| {
                    flush_changes::<Task>(transaction, task_changes)
                })
            })
            .await?;

        let affected = outcome.affected;
        self.tasks.settle(outcome.inserted);
        tracing::debug!(queued, affected, "committed postgres unit of work");
        Ok(affected)
    }
}

impl TaskUnitOfWork for PostgresTaskUnitOfWork {
    type Tasks = PostgresRepository<Task>;

    fn tasks(&mut self) -> &mut Self::Tasks {
        &mut self.tasks
    }
}
