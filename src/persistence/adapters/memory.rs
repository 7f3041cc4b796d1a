//! In-memory storage backend.
//!
//! A [`MemoryTable`] is shared by every unit of work of a process; each
//! [`InMemoryRepository`] keeps its own queue of pending changes and applies
//! it to the table in one write-locked step.

use crate::persistence::{
    Change, ChangeSet, FlushOutcome, Staged,
    ports::{Entity, Repository, RepositoryError, RepositoryResult, SurrogateKey},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe table of entities keyed by identifier.
#[derive(Debug)]
pub struct MemoryTable<E: Entity> {
    state: Arc<RwLock<TableState<E>>>,
}

#[derive(Debug)]
struct TableState<E: Entity> {
    rows: BTreeMap<E::Id, E>,
    last_key: i64,
}

impl<E: Entity> Default for MemoryTable<E> {
    fn default() -> Self {
        Self {
            state: Arc::new(RwLock::new(TableState {
                rows: BTreeMap::new(),
                last_key: 0,
            })),
        }
    }
}

impl<E: Entity> Clone for MemoryTable<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<E: Entity> MemoryTable<E> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, TableState<E>>> {
        self.state
            .read()
            .map_err(RepositoryError::storage_unavailable)
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, TableState<E>>> {
        self.state
            .write()
            .map_err(RepositoryError::storage_unavailable)
    }

    /// Returns the row stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the table lock is
    /// poisoned.
    pub fn get(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    /// Returns every row in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the table lock is
    /// poisoned.
    pub fn all(&self) -> RepositoryResult<Vec<E>> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    /// Returns every row matching `filter` in ascending identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the table lock is
    /// poisoned.
    pub fn matching(&self, filter: &E::Filter) -> RepositoryResult<Vec<E>> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|entity| entity.matches(filter))
            .cloned()
            .collect())
    }

    /// Applies `changes` in order while holding the write lock.
    ///
    /// Inserts take the next key of a counter that is never rewound, so
    /// identifiers of deleted rows are not reused. Updates and deletes of
    /// missing rows affect nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the table lock is
    /// poisoned; nothing is applied in that case.
    pub fn apply(&self, changes: Vec<Change<E>>) -> RepositoryResult<FlushOutcome<E>> {
        let mut outcome = FlushOutcome::default();
        if changes.is_empty() {
            return Ok(outcome);
        }

        let mut state = self.write()?;
        for change in changes {
            match change {
                Change::Insert { ticket, draft } => {
                    state.last_key += 1;
                    let id = E::Id::from_raw(state.last_key);
                    let entity = E::from_draft(id, draft);
                    state.rows.insert(id, entity.clone());
                    outcome.inserted.push((ticket, entity));
                    outcome.affected += 1;
                }
                Change::Update(entity) => {
                    if let Some(row) = state.rows.get_mut(&entity.id()) {
                        *row = entity;
                        outcome.affected += 1;
                    }
                }
                Change::Delete(id) => {
                    if state.rows.remove(&id).is_some() {
                        outcome.affected += 1;
                    }
                }
            }
        }
        Ok(outcome)
    }
}

/// Repository over a shared [`MemoryTable`].
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    table: MemoryTable<E>,
    changes: ChangeSet<E>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates a repository with an empty change queue over `table`.
    #[must_use]
    pub fn new(table: MemoryTable<E>) -> Self {
        Self {
            table,
            changes: ChangeSet::new(),
        }
    }

    /// Flushes the queued changes into the table.
    ///
    /// Called by the owning unit of work; returns the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the table lock is
    /// poisoned. The queued changes are discarded either way.
    pub fn flush(&mut self) -> RepositoryResult<usize> {
        let outcome = self.table.apply(self.changes.drain())?;
        self.changes.settle(outcome.inserted);
        Ok(outcome.affected)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        self.table.get(id)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<E>> {
        self.table.all()
    }

    async fn find(&self, filter: &E::Filter) -> RepositoryResult<Vec<E>> {
        self.table.matching(filter)
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
