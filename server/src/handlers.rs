//! Request handlers, one per operation.
//!
//! Each handler validates its input, makes at most one store call and maps
//! the outcome to a JSON response. Failures become `ApiError`s.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use todo_core::{CreateTodo, Created, Message, TodoId, TodoList, UpdateTodo};
use tracing::{debug, info};

use crate::error::{decode_json, ApiError, ResultExt};
use crate::AppState;

const HOME_PAGE: &str = include_str!("../static/home.html");

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, ApiError> {
    let records = state
        .store
        .find_all()
        .await
        .context("Failed to fetch todos")?;
    debug!(count = records.len(), "listed todos");
    Ok(Json(TodoList::from(records)))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let input: CreateTodo = decode_json(&body)?;
    let record = input.into_record()?;
    let id = record.id;

    state
        .store
        .insert(record)
        .await
        .context("Failed to save todo")?;

    info!(todo_id = %id, "todo created");
    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "todo created successfully".to_string(),
            todo_id: id.to_hex(),
        }),
    ))
}

pub async fn update_todo(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<Message>, ApiError> {
    // The id is checked before the body so a bad id wins over a bad body.
    let Path(raw_id) = raw_id?;
    let id = TodoId::parse(&raw_id)?;
    let input: UpdateTodo = decode_json(&body)?;
    let changes = input.into_changes()?;

    state
        .store
        .update_by_id(id, changes)
        .await
        .context("Failed to update todo")?;

    info!(todo_id = %id, "todo updated");
    Ok(Json(Message::new("todo updated successfully")))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let Path(raw_id) = raw_id?;
    let id = TodoId::parse(&raw_id)?;

    state
        .store
        .delete_by_id(id)
        .await
        .context("Failed to delete todo")?;

    info!(todo_id = %id, "todo deleted");
    Ok(Json(Message::new("todo deleted successfully")))
}
