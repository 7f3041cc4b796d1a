//! Pooled connection session scoped to one unit of work.

use crate::persistence::ports::{RepositoryError, RepositoryResult};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use std::fmt;
use std::sync::{Arc, Mutex};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`RepositoryError::Persistence`] when the pool cannot establish
/// its initial connections.
pub fn build_pool(database_url: &str, max_size: u32) -> RepositoryResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(RepositoryError::persistence)
}

/// One pooled connection checked out for a unit of work.
///
/// Clones share the same connection. The connection returns to the pool
/// when the last clone is dropped.
#[derive(Clone)]
pub struct PgSession {
    connection: Arc<Mutex<PooledConn>>,
}

impl fmt::Debug for PgSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgSession").finish_non_exhaustive()
    }
}

impl PgSession {
    /// Checks a connection out of `pool`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the pool times out or
    /// the blocking task fails.
    pub async fn open(pool: &PgPool) -> RepositoryResult<Self> {
        let shared_pool = pool.clone();
        let connection =
            run_blocking(move || shared_pool.get().map_err(RepositoryError::persistence)).await?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Runs `f` against the session connection on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`, or returns
    /// [`RepositoryError::Persistence`] if the connection lock is poisoned or
    /// the blocking task fails.
    pub async fn run<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        run_blocking(move || {
            let mut guard = connection
                .lock()
                .map_err(RepositoryError::storage_unavailable)?;
            f(&mut guard)
        })
        .await
    }
}

/// Runs a blocking database operation on a dedicated thread pool.
async fn run_blocking<F, T>(f: F) -> RepositoryResult<T>
where
    F: FnOnce() -> RepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(RepositoryError::persistence)?
}
