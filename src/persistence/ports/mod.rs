//! Port contracts for entity persistence.
//!
//! Ports define storage-agnostic interfaces used by entity services.

pub mod entity;
pub mod repository;
pub mod unit_of_work;

pub use entity::{Entity, SurrogateKey};
pub use repository::{Repository, RepositoryError, RepositoryResult};
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};
