//! Task HTTP handlers.
//!
//! This module implements the task endpoints, each a single Asana call:
//! - GET /asana/task/{id} - Fetch one task
//! - POST /asana/task - Create a task
//! - PUT /asana/task/{id} - Update some fields of a task
//! - DELETE /asana/task/{id} - Delete a task
//! - GET /asana/tasks?workspace=GID - Incomplete tasks assigned to the user

use crate::{
    error::AppError,
    extract::JsonOrEmpty,
    middleware::session::SessionContext,
    models::{
        envelope::DataEnvelope,
        query::WorkspaceQuery,
        task::{CreateTaskRequest, NewTask, TaskUpdate, UpdateTaskRequest},
    },
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use url::form_urlencoded;

/// Asana path of one task, with `gid` percent-encoded as a single segment.
///
/// `/`, `?` and `%` in the id never reach the upstream path unescaped.
fn task_path(gid: &str) -> Result<String, AppError> {
    // Dot segments are normalised away even when percent-encoded.
    if gid == "." || gid == ".." {
        return Err(AppError::InvalidTaskId);
    }

    // Form encoding writes spaces as `+`; a literal `+` is already `%2B`.
    let segment = form_urlencoded::byte_serialize(gid.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    Ok(format!("tasks/{segment}"))
}

/// Get a task by id.
///
/// # Response
///
/// - **Success (200 OK)**: the task object, unwrapped from Asana's `data`
/// - **Error (401)**: not logged in
/// - **Error (400)**: Asana rejected the call
pub async fn get_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(task_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let task = state
        .asana
        .get_data(&session.access_token, &task_path(&task_id)?, &[])
        .await?;

    Ok(Json(task))
}

/// Create a task.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Write release notes",
///   "workspace": "1200000000000001",
///   "project": "1200000000000002",
///   "assignee": "me",
///   "due_on": "2026-11-01"
/// }
/// ```
///
/// `project` is sent to Asana as `"projects": [project]`. A missing body, or
/// one not sent as JSON, is treated as `{}`.
///
/// # Response
///
/// - **Success (200 OK)**: Asana's response as returned, still wrapped in `data`
pub async fn create_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    JsonOrEmpty(request): JsonOrEmpty<CreateTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let body = DataEnvelope::new(NewTask::from(request));

    let created = state
        .asana
        .post(&session.access_token, "tasks", &body)
        .await?;

    Ok(Json(created))
}

/// Update a task.
///
/// Only `name`, `notes`, `assignee` and `due_on` are forwarded, and only
/// when truthy. Empty strings therefore cannot clear a field. A missing
/// body is treated as `{}`.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(task_id): Path<String>,
    JsonOrEmpty(request): JsonOrEmpty<UpdateTaskRequest>,
) -> Result<Json<Value>, AppError> {
    let body = DataEnvelope::new(TaskUpdate::from(request));

    let updated = state
        .asana
        .put(&session.access_token, &task_path(&task_id)?, &body)
        .await?;

    Ok(Json(updated))
}

/// Delete a task.
///
/// # Response
///
/// Returns 204 No Content on success.
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(task_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .asana
        .delete(&session.access_token, &task_path(&task_id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the user's incomplete tasks in a workspace.
///
/// Calls `GET tasks?assignee=me&workspace=W&completed_since=now` and returns
/// the `data` array.
///
/// # Errors
///
/// - `MissingWorkspace` (400) when `workspace` is absent; Asana is not called
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<Value>, AppError> {
    let workspace = query.workspace_gid().ok_or(AppError::MissingWorkspace)?;

    let tasks = state
        .asana
        .get_data(
            &session.access_token,
            "tasks",
            &[
                ("assignee", "me"),
                ("workspace", workspace),
                ("completed_since", "now"),
            ],
        )
        .await?;

    Ok(Json(tasks))
}
