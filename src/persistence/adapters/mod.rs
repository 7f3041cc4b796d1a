//! Storage backends for the persistence ports.

pub mod memory;
pub mod postgres;
