//! Unit-of-work port: the transactional boundary around repositories.

use super::RepositoryResult;
use async_trait::async_trait;

/// Owns the repositories and storage session of one logical operation.
///
/// Implementations release their storage session when dropped, whatever the
/// exit path. A unit of work is never shared between operations.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Flushes the queued changes of every owned repository atomically.
    ///
    /// Returns the number of affected rows. Queued changes are consumed
    /// whether the commit succeeds or fails; on failure none of them are
    /// visible in storage.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError`] when storage rejects the changes or
    /// is unreachable.
    async fn commit(&mut self) -> RepositoryResult<usize>;
}

/// Opens units of work against one configured storage backend.
#[async_trait]
pub trait UnitOfWorkFactory: Clone + Send + Sync + 'static {
    /// Unit-of-work type produced by this factory.
    type UnitOfWork: UnitOfWork + 'static;

    /// Begins a new unit of work with its own storage session.
    ///
    /// # Errors
    ///
    /// Returns [`super::RepositoryError`] when no storage session can be
    /// acquired.
    async fn begin(&self) -> RepositoryResult<Self::UnitOfWork>;
}
