//! Generic `PostgreSQL` repository bound to a unit-of-work session.

use super::{PgEntity, PgSession};
use crate::persistence::{
    Change, ChangeSet, Staged,
    ports::{Repository, RepositoryResult},
};
use async_trait::async_trait;

/// `PostgreSQL`-backed repository for one entity table.
///
/// Reads run immediately on the session connection; writes are queued until
/// the owning unit of work commits them in a transaction.
#[derive(Debug)]
pub struct PostgresRepository<E: PgEntity> {
    session: PgSession,
    changes: ChangeSet<E>,
}

impl<E: PgEntity> PostgresRepository<E> {
    /// Creates a repository sharing `session` with its unit of work.
    #[must_use]
    pub fn new(session: PgSession) -> Self {
        Self {
            session,
            changes: ChangeSet::new(),
        }
    }

    /// Removes the queued changes so the unit of work can flush them.
    pub fn take_changes(&mut self) -> Vec<Change<E>> {
        self.changes.drain()
    }

    /// Records the rows inserted by a committed flush.
    pub fn settle(&mut self, inserted: Vec<(u64, E)>) {
        self.changes.settle(inserted);
    }
}

#[async_trait]
impl<E: PgEntity> Repository<E> for PostgresRepository<E> {
    async fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        self.session
            .run(move |connection| E::load(connection, id))
            .await
    }

    async fn get_all(&self) -> RepositoryResult<Vec<E>> {
        self.session
            .run(|connection| E::load_matching(connection, &E::Filter::default()))
            .await
    }

    async fn find(&self, filter: &E::Filter) -> RepositoryResult<Vec<E>> {
        let owned_filter = filter.clone();
        self.session
            .run(move |connection| E::load_matching(connection, &owned_filter))
            .await
    }

    fn add(&mut self, draft: E::Draft) -> Staged<E> {
        self.changes.stage_insert(draft)
    }

    fn update(&mut self, entity: E) {
        self.changes.stage_update(entity);
    }

    fn delete(&mut self, entity: &E) {
        self.changes.stage_delete(entity.id());
    }

    fn pending(&self) -> usize {
        self.changes.len()
    }

    fn take_persisted(&mut self, staged: Staged<E>) -> Option<E> {
        self.changes.take_persisted(&staged)
    }
}
