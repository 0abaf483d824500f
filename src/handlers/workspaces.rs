//! Workspace and project HTTP handlers.
//!
//! - GET /asana/workspaces - Workspaces visible to the user
//! - GET /asana/projects?workspace=GID - Projects in a workspace

use crate::{
    error::AppError, middleware::session::SessionContext, models::query::WorkspaceQuery,
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::Value;

/// List workspaces.
///
/// # Response (200 OK)
///
/// ```json
/// [
///   { "gid": "1200000000000001", "name": "Engineering", "resource_type": "workspace" }
/// ]
/// ```
pub async fn list_workspaces(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Value>, AppError> {
    let workspaces = state
        .asana
        .get_data(&session.access_token, "workspaces", &[])
        .await?;

    Ok(Json(workspaces))
}

/// List projects in a workspace.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<WorkspaceQuery>,
) -> Result<Json<Value>, AppError> {
    let workspace = query.workspace_gid().ok_or(AppError::MissingWorkspace)?;

    let projects = state
        .asana
        .get_data(&session.access_token, "projects", &[("workspace", workspace)])
        .await?;

    Ok(Json(projects))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn list_workspaces_unwraps_data() {
        let asana = MockAsana::start().await;
        let state = test_state(&asana.origin);
        let cookie = login(&state).await;

        let (status, _, body) = send(state, get("/asana/workspaces", Some(&cookie))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!([{ "gid": "w1", "name": "Engineering" }]));
    }

    #[tokio::test]
    async fn list_projects_filters_by_workspace() {
        let asana = MockAsana::start().await;
        let state = test_state(&asana.origin);
        let cookie = login(&state).await;

        let (status, _, body) =
            send(state, get("/asana/projects?workspace=w1", Some(&cookie))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!([{ "gid": "p1", "name": "Roadmap" }]));
        let call = asana.only_request();
        assert_eq!(call.path, "/api/1.0/projects");
        assert_eq!(call.query["workspace"], "w1");
    }

    #[tokio::test]
    async fn list_projects_without_workspace_never_calls_asana() {
        let asana = MockAsana::start().await;
        let state = test_state(&asana.origin);
        let cookie = login(&state).await;

        let (status, _, _) = send(state, get("/asana/projects", Some(&cookie))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(asana.requests().is_empty());
    }

    #[tokio::test]
    async fn list_routes_check_session_before_workspace() {
        let asana = MockAsana::start().await;
        let state = test_state(&asana.origin);

        for uri in ["/asana/workspaces", "/asana/projects", "/asana/users"] {
            let (status, _, _) = send(state.clone(), get(uri, None)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        }

        assert!(asana.requests().is_empty());
    }

    #[tokio::test]
    async fn expired_access_token_relays_asana_401_as_400() {
        let asana = MockAsana::start().await;
        let state = test_state(&asana.origin);
        let id = state
            .sessions
            .create(crate::session_store::SessionData {
                access_token: Some("revoked".to_string()),
                refresh_token: None,
            })
            .await;

        let (status, _, body) = send(
            state,
            get("/asana/workspaces", Some(&format!("asana_relay_session={id}"))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(&body),
            json!({ "error": { "errors": [{ "message": "Not Authorized" }] } })
        );
    }
}
