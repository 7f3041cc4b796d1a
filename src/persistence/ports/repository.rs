//! Repository port for single-entity data access.

use super::Entity;
use crate::persistence::Staged;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository and unit-of-work operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Data-access contract for one entity type.
///
/// Reads go straight to storage. Mutations are only queued; they reach
/// storage when the owning [`super::UnitOfWork`] commits.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Finds an entity by identifier.
    ///
    /// Returns `None` when no row matches.
    async fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>>;

    /// Returns every persisted entity.
    async fn get_all(&self) -> RepositoryResult<Vec<E>>;

    /// Returns every persisted entity matching `filter`.
    async fn find(&self, filter: &E::Filter) -> RepositoryResult<Vec<E>>;

    /// Queues a new entity for insertion.
    ///
    /// The returned ticket resolves to the persisted entity, including its
    /// storage-assigned identifier, after the next successful commit.
    fn add(&mut self, draft: E::Draft) -> Staged<E>;

    /// Queues replacement of the stored field values of `entity`.
    ///
    /// Committing an update for an identifier that is not stored affects no
    /// rows and is not an error.
    fn update(&mut self, entity: E);

    /// Queues removal of `entity`.
    fn delete(&mut self, entity: &E);

    /// Returns the number of queued, uncommitted changes.
    fn pending(&self) -> usize;

    /// Resolves a staged insert after commit.
    ///
    /// Returns `None` if the ticket has not been committed yet or was
    /// already resolved.
    fn take_persisted(&mut self, staged: Staged<E>) -> Option<E>;
}

/// Errors returned by repository and unit-of-work implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A committed insert did not report its persisted row.
    #[error("staged insert {0} was not resolved by the commit")]
    UnresolvedInsert(u64),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    #[must_use]
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence-layer failure.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Builds a persistence error from a poisoned lock or similar message.
    #[must_use]
    pub fn storage_unavailable(message: impl std::fmt::Display) -> Self {
        Self::persistence(std::io::Error::other(message.to_string()))
    }
}
