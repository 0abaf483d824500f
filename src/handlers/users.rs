//! User HTTP handlers.
//!
//! - GET /asana/me - The logged-in Asana user
//! - GET /asana/users?workspace=GID - Users in a workspace

use crate::{
    error::AppError, middleware::session::SessionContext, models::query::WorkspaceQuery,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::Value;

/// Get the logged-in user.
///
/// Returns Asana's `users/me` response body as-is (still wrapped in `data`).
pub async fn me(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Value>, AppError> {
    let user = state
        .asana
        .get(&session.access_token, "users/me", &[])
        .await?;

    Ok(Json(user))
}

/// List users in a workspace.
///
/// # Errors
///
/// - `MissingWorkspace` (400) when `workspace` is absent; Asana is not called
pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<Value>, AppError> {
    let workspace = query.workspace_gid().ok_or(AppError::MissingWorkspace)?;

    let users = state
        .asana
        .get_data(&session.access_token, "users", &[("workspace", workspace)])
        .await?;

    Ok(Json(users))
}
