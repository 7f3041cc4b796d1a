//! Task tracking service.
//!
//! This crate stores task records (title, description, progress status, and
//! an optional due date) and exposes them over a small HTTP API.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`, HTTP)
//!
//! # Modules
//!
//! - [`persistence`]: Entity-agnostic repository and unit-of-work layer
//! - [`task`]: Task domain, storage adapters, and service
//! - [`http`]: Axum routes translating requests into service calls
//! - [`config`]: Runtime settings

pub mod config;
pub mod http;
pub mod persistence;
pub mod task;
