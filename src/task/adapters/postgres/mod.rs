//! `PostgreSQL` adapters for task persistence.

mod models;
mod schema;
mod table;
mod unit_of_work;

pub use unit_of_work::{CREATE_TASKS_SQL, PostgresTaskStore, PostgresTaskUnitOfWork};
