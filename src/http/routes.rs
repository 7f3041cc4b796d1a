//! Route table and handlers of the task API.

use super::{ApiError, ListTasksQuery, TaskPayload, TaskResponse};
use crate::persistence::ports::UnitOfWorkFactory;
use crate::task::{domain::TaskId, ports::TaskStore, services::TaskService};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Shared handler state holding the unit-of-work factory.
#[derive(Debug, Clone)]
pub struct AppState<F> {
    store: F,
}

impl<F: TaskStore> AppState<F> {
    /// Wraps a task store.
    #[must_use]
    pub const fn new(store: F) -> Self {
        Self { store }
    }

    /// Opens a service over a fresh unit of work.
    async fn service(&self) -> Result<TaskService<F::UnitOfWork>, ApiError> {
        Ok(TaskService::new(self.store.begin().await?))
    }
}

/// Builds the task API router over `store`.
pub fn router<F: TaskStore>(store: F) -> Router {
    Router::new()
        .route("/tasks", post(create_task::<F>).get(list_tasks::<F>))
        .route(
            "/tasks/{id}",
            get(get_task::<F>)
                .put(update_task::<F>)
                .delete(delete_task::<F>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

async fn create_task<F: TaskStore>(
    State(state): State<AppState<F>>,
    Json(payload): Json<TaskPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.service().await?.create(payload.into_input()).await?;
    let location = format!("/tasks/{}", created.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TaskResponse::from(created)),
    ))
}

async fn list_tasks<F: TaskStore>(
    State(state): State<AppState<F>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state
        .service()
        .await?
        .list(query.status, query.due_date)
        .await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

async fn get_task<F: TaskStore>(
    State(state): State<AppState<F>>,
    Path(raw_id): Path<i64>,
) -> Result<Json<TaskResponse>, ApiError> {
    let id = TaskId::new(raw_id);
    state
        .service()
        .await?
        .get_by_id(id)
        .await?
        .map(|task| Json(TaskResponse::from(task)))
        .ok_or(ApiError::NotFound(id))
}

async fn update_task<F: TaskStore>(
    State(state): State<AppState<F>>,
    Path(raw_id): Path<i64>,
    Json(payload): Json<TaskPayload>,
) -> Result<StatusCode, ApiError> {
    state
        .service()
        .await?
        .update(TaskId::new(raw_id), payload.into_input())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_task<F: TaskStore>(
    State(state): State<AppState<F>>,
    Path(raw_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.service().await?.delete(TaskId::new(raw_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
