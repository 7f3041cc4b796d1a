//! HTTP adapter tests driven through the router with `oneshot`.

use super::helpers::{read_json, send, store};
use axum::http::{StatusCode, header};
use rstest::rstest;
use serde_json::json;
use task_tracker::{
    http::{ErrorResponse, TaskResponse},
    task::{adapters::memory::InMemoryTaskStore, domain::TaskStatus},
};

async fn create(store: &InMemoryTaskStore, body: serde_json::Value) -> eyre::Result<TaskResponse> {
    let response = send(store, "POST", "/tasks", Some(body)).await?;
    eyre::ensure!(
        response.status() == StatusCode::CREATED,
        "unexpected create status {}",
        response.status()
    );
    read_json(response).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn post_returns_created_task_with_location(store: InMemoryTaskStore) -> eyre::Result<()> {
    let response = send(
        &store,
        "POST",
        "/tasks",
        Some(json!({
            "title": "Buy milk",
            "description": "",
            "status": 2,
            "dueDate": "2024-01-10"
        })),
    )
    .await?;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let created: TaskResponse = read_json(response).await?;

    assert_eq!(location, Some(format!("/tasks/{}", created.id)));
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.due_date.map(|day| day.to_string()).as_deref(), Some("2024-01-10"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wire_format_uses_camel_case_and_numeric_status(
    store: InMemoryTaskStore,
) -> eyre::Result<()> {
    let created = create(
        &store,
        json!({"title": "Pay rent", "dueDate": "2024-01-10T18:30:00"}),
    )
    .await?;

    let response = send(&store, "GET", &format!("/tasks/{}", created.id), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(response).await?;

    assert_eq!(
        body,
        json!({
            "id": created.id,
            "title": "Pay rent",
            "description": "",
            "status": 0,
            "dueDate": "2024-01-10"
        })
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_is_not_found(store: InMemoryTaskStore) -> eyre::Result<()> {
    let response = send(&store, "GET", "/tasks/404", None).await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = read_json(response).await?;
    assert!(body.error.contains("404"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_is_bad_request(store: InMemoryTaskStore) -> eyre::Result<()> {
    let response = send(&store, "POST", "/tasks", Some(json!({"title": "   "}))).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = read_json(response).await?;
    assert_eq!(body.error, "task title must not be empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status_and_vencimento(store: InMemoryTaskStore) -> eyre::Result<()> {
    let first = create(&store, json!({"title": "a", "dueDate": "2024-01-10"})).await?;
    let second = create(&store, json!({"title": "b", "dueDate": "2024-01-11"})).await?;
    let update = send(
        &store,
        "PUT",
        &format!("/tasks/{}", second.id),
        Some(json!({"title": "b", "status": 2, "dueDate": "2024-01-11"})),
    )
    .await?;
    assert_eq!(update.status(), StatusCode::NO_CONTENT);

    let by_day: Vec<TaskResponse> =
        read_json(send(&store, "GET", "/tasks?vencimento=2024-01-10", None).await?).await?;
    assert_eq!(by_day, vec![first.clone()]);

    let done: Vec<TaskResponse> =
        read_json(send(&store, "GET", "/tasks?status=2", None).await?).await?;
    assert_eq!(done.iter().map(|task| task.id).collect::<Vec<_>>(), vec![second.id]);

    let none: Vec<TaskResponse> = read_json(
        send(&store, "GET", "/tasks?status=2&vencimento=2024-01-10", None).await?,
    )
    .await?;
    assert!(none.is_empty());

    let all: Vec<TaskResponse> =
        read_json(send(&store, "GET", "/tasks?status=&vencimento=", None).await?).await?;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_query_is_rejected(store: InMemoryTaskStore) -> eyre::Result<()> {
    let response = send(&store, "GET", "/tasks?vencimento=next-week", None).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_replaces_fields_and_allows_any_transition(
    store: InMemoryTaskStore,
) -> eyre::Result<()> {
    let created = create(&store, json!({"title": "Ship release"})).await?;
    let uri = format!("/tasks/{}", created.id);

    for status in [2, 0] {
        let response = send(
            &store,
            "PUT",
            &uri,
            Some(json!({"title": "Ship release v2", "description": "notes", "status": status})),
        )
        .await?;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let fetched: TaskResponse = read_json(send(&store, "GET", &uri, None).await?).await?;
    assert_eq!(fetched.title, "Ship release v2");
    assert_eq!(fetched.description, "notes");
    assert_eq!(fetched.status, TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_and_delete_of_unknown_task_are_silent(store: InMemoryTaskStore) -> eyre::Result<()> {
    let put = send(&store, "PUT", "/tasks/77", Some(json!({"title": "ghost"}))).await?;
    assert_eq!(put.status(), StatusCode::NO_CONTENT);

    let delete = send(&store, "DELETE", "/tasks/77", None).await?;
    assert_eq!(delete.status(), StatusCode::NO_CONTENT);

    let all: Vec<TaskResponse> = read_json(send(&store, "GET", "/tasks", None).await?).await?;
    assert!(all.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn put_with_blank_title_to_unknown_task_is_silent(
    store: InMemoryTaskStore,
) -> eyre::Result<()> {
    let put = send(&store, "PUT", "/tasks/77", Some(json!({"title": ""}))).await?;
    assert_eq!(put.status(), StatusCode::NO_CONTENT);

    let all: Vec<TaskResponse> = read_json(send(&store, "GET", "/tasks", None).await?).await?;
    assert!(all.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_code_is_ignored_on_create(store: InMemoryTaskStore) -> eyre::Result<()> {
    let created = create(&store, json!({"title": "Walk dog", "status": 7})).await?;

    assert_eq!(created.status, TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_code_on_put_is_bad_request_for_existing_task(
    store: InMemoryTaskStore,
) -> eyre::Result<()> {
    let created = create(&store, json!({"title": "Walk dog"})).await?;
    let uri = format!("/tasks/{}", created.id);

    let response = send(&store, "PUT", &uri, Some(json!({"title": "Walk cat", "status": 7}))).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched: TaskResponse = read_json(send(&store, "GET", &uri, None).await?).await?;
    assert_eq!(fetched, created);

    let ghost = send(&store, "PUT", "/tasks/77", Some(json!({"title": "x", "status": 7}))).await?;
    assert_eq!(ghost.status(), StatusCode::NO_CONTENT);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_twice_is_a_no_op_the_second_time(store: InMemoryTaskStore) -> eyre::Result<()> {
    let created = create(&store, json!({"title": "Temporary"})).await?;
    let uri = format!("/tasks/{}", created.id);

    for _ in 0..2 {
        let response = send(&store, "DELETE", &uri, None).await?;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = send(&store, "GET", &uri, None).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
