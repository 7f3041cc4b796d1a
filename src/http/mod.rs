//! HTTP adapter for task tracking.
//!
//! Every request opens its own unit of work from the shared [`TaskStore`],
//! runs one [`crate::task::services::TaskService`] operation, and drops the
//! unit of work before the response is sent.

mod dto;
mod error;
mod routes;

pub use dto::{ListTasksQuery, TaskPayload, TaskResponse, parse_calendar_day};
pub use error::{ApiError, ErrorResponse};
pub use routes::{AppState, router};

use crate::task::ports::TaskStore;
use std::net::SocketAddr;

/// Binds `addr` and serves the task API until the process is stopped.
///
/// # Errors
///
/// Returns an I/O error when the address cannot be bound or the server
/// fails.
pub async fn serve<F: TaskStore>(store: F, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "task API listening");
    axum::serve(listener, router(store)).await
}
