//! Todo handlers (list, create, update, delete, toggle).

use axum::extract::State;
use axum::Json;

use todo_storage::{CategoryFilter, TodoFields, TodoId, TodoItem};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::schema::todos::{CreateTodoRequest, ListTodosQuery, TodoPath, UpdateTodoRequest};
use crate::state::AppState;

/// Lists todos, optionally filtered by completion.
///
/// `GET /todos?category=completed|incomplete`
pub async fn list_todos(
    State(state): State<AppState>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let query = ListTodosQuery::from_pairs(pairs);
    let filter = CategoryFilter::from_param(query.category.as_deref());
    let todos = state.with_store(move |store| store.list_todos(filter)).await?;
    Ok(Json(todos))
}

/// Creates a todo.
///
/// `POST /todos`
pub async fn create_todo(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTodoRequest>,
) -> Result<Json<TodoItem>, ApiError> {
    let fields = TodoFields::from(req);
    let item = state
        .with_store(move |store| store.create_todo(&fields))
        .await?;
    tracing::debug!(id = %item.id, "created todo");
    Ok(Json(item))
}

/// Replaces a todo's text, completion, and category.
///
/// `PUT /todos/{id}`
pub async fn update_todo(
    State(state): State<AppState>,
    ApiPath(TodoPath { id }): ApiPath<TodoPath>,
    ApiJson(req): ApiJson<UpdateTodoRequest>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = TodoId(id);
    let fields = TodoFields::from(req);
    let item = state
        .with_store(move |store| store.update_todo(id, &fields))
        .await?;
    tracing::debug!(%id, "updated todo");
    Ok(Json(item))
}

/// Deletes a todo, returning it as it was.
///
/// `DELETE /todos/{id}`
pub async fn delete_todo(
    State(state): State<AppState>,
    ApiPath(TodoPath { id }): ApiPath<TodoPath>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = TodoId(id);
    let item = state.with_store(move |store| store.delete_todo(id)).await?;
    tracing::debug!(%id, "deleted todo");
    Ok(Json(item))
}

/// Flips a todo's completion flag.
///
/// `PATCH /todos/{id}`
pub async fn toggle_todo(
    State(state): State<AppState>,
    ApiPath(TodoPath { id }): ApiPath<TodoPath>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = TodoId(id);
    let item = state.with_store(move |store| store.toggle_todo(id)).await?;
    tracing::debug!(%id, completed = item.completed, "toggled todo");
    Ok(Json(item))
}
