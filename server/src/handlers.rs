//! Thin adapters from HTTP requests to repository calls.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use todo_core::{Todo, TodoDraft};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Todo>>> {
    let todos = state.repository.get_all().await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<TodoDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let Json(draft) = body?;
    let id = Uuid::new_v4();
    let todo = state.repository.create(id, draft).await?;
    tracing::info!(%id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Todo>> {
    let Path(id) = path?;
    Ok(Json(state.repository.get_by_id(id).await?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<TodoDraft>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let Path(id) = path?;
    let Json(draft) = body?;
    let todo = state.repository.update(id, draft).await?;
    tracing::info!(%id, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    state.repository.delete(id).await?;
    tracing::info!(%id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}
