//! Shared test helpers for in-memory integration tests.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use chrono::NaiveDate;
use eyre::WrapErr;
use rstest::fixture;
use serde::de::DeserializeOwned;
use task_tracker::{
    http::router,
    persistence::ports::UnitOfWorkFactory,
    task::{
        adapters::memory::{InMemoryTaskStore, InMemoryTaskUnitOfWork},
        services::TaskService,
    },
};
use tower::ServiceExt;

/// Largest response body read by the helpers.
const BODY_LIMIT: usize = 1024 * 1024;

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> InMemoryTaskStore {
    InMemoryTaskStore::new()
}

/// Opens a service over a new unit of work.
///
/// # Errors
///
/// Returns an error if the unit of work cannot be started.
pub async fn service(store: &InMemoryTaskStore) -> eyre::Result<TaskService<InMemoryTaskUnitOfWork>> {
    let unit_of_work = store.begin().await.wrap_err("begin unit of work")?;
    Ok(TaskService::new(unit_of_work))
}

/// Builds a calendar date.
///
/// # Errors
///
/// Returns an error if the date does not exist.
pub fn date(year: i32, month: u32, day: u32) -> eyre::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| eyre::eyre!("invalid date {year}-{month}-{day}"))
}

/// Sends one request through a router built over `store`.
///
/// # Errors
///
/// Returns an error if the request cannot be built or the router fails.
pub async fn send(
    store: &InMemoryTaskStore,
    method: &str,
    uri: &str,
    json_body: Option<serde_json::Value>,
) -> eyre::Result<Response<Body>> {
    let app: Router = router(store.clone());
    let builder = Request::builder().method(method).uri(uri);
    let request = match json_body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value)?)),
        None => builder.body(Body::empty()),
    }
    .wrap_err("build request")?;
    app.oneshot(request).await.wrap_err("route request")
}

/// Reads and decodes a JSON response body.
///
/// # Errors
///
/// Returns an error if the body cannot be read or decoded.
pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> eyre::Result<T> {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .wrap_err("read response body")?;
    serde_json::from_slice(&bytes).wrap_err("decode response body")
}
