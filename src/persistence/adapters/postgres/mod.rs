//! `PostgreSQL` storage backend using Diesel ORM.
//!
//! Diesel is synchronous, so every database call is offloaded to the
//! blocking thread pool via [`tokio::task::spawn_blocking`]. A [`PgSession`]
//! pins one pooled connection for the lifetime of a unit of work; all reads
//! and the commit transaction of that unit of work run on it.

mod entity;
mod repository;
mod session;

pub use entity::{PgEntity, flush_changes};
pub use repository::PostgresRepository;
pub use session::{PgPool, PgSession, build_pool};

use crate::persistence::ports::RepositoryError;

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
