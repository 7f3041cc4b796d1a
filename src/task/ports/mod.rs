//! Port contracts for task persistence.
//!
//! Ports define storage-agnostic interfaces used by the task service.

pub mod unit_of_work;

pub use unit_of_work::{TaskRepository, TaskStore, TaskUnitOfWork};
