//! Entity-agnostic persistence layer.
//!
//! A [`ports::Repository`] provides data access for exactly one entity type
//! and queues its mutations in a [`ChangeSet`]. A [`ports::UnitOfWork`] owns
//! one or more repositories and flushes every queued change in a single
//! atomic commit. Two storage backends satisfy the same contract:
//!
//! - [`adapters::memory`]: ephemeral tables shared by every unit of work of
//!   the process
//! - [`adapters::postgres`]: durable `PostgreSQL` storage through Diesel
//!
//! Entity-specific code only supplies an [`ports::Entity`] implementation
//! (and [`adapters::postgres::PgEntity`] for the durable backend).

pub mod adapters;
pub mod changes;
pub mod ports;

pub use changes::{Change, ChangeSet, FlushOutcome, Staged};
