//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::asana_client::UpstreamError;

/// Application-wide error type.
///
/// Each handler makes a single upstream call, so every failure is one of
/// three kinds and is converted to a response in exactly one place.
///
/// # Error Categories
///
/// - **Authentication Errors**: no access token in the session
/// - **Validation Errors**: a required query parameter is missing, or a task
///   id cannot be carried as a single path segment
/// - **Upstream Errors**: the Asana call failed (non-2xx or transport error)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The browser session holds no access token.
    ///
    /// Returns HTTP 401 Unauthorized with a plain-text body.
    #[error("Not logged in")]
    NotLoggedIn,

    /// A list route was called without the `workspace` query parameter.
    ///
    /// Returns HTTP 400 Bad Request with a plain-text body.
    #[error("Workspace ID is required")]
    MissingWorkspace,

    /// A task id of `.` or `..`, which would resolve to a different path.
    ///
    /// Returns HTTP 400 Bad Request with a plain-text body.
    #[error("Invalid task ID")]
    InvalidTaskId,

    /// The upstream call failed.
    ///
    /// Returns HTTP 400 Bad Request with `{"error": <payload>}`.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Convert AppError into an HTTP response.
///
/// # Status Code Mapping
///
/// - `NotLoggedIn` → 401 Unauthorized, `text/plain`
/// - `MissingWorkspace`, `InvalidTaskId` → 400 Bad Request, `text/plain`
/// - `Upstream` → 400 Bad Request, JSON carrying the upstream error body
///   when there is one, otherwise the error message
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotLoggedIn => (StatusCode::UNAUTHORIZED, self.to_string()).into_response(),
            AppError::MissingWorkspace | AppError::InvalidTaskId => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            AppError::Upstream(err) => {
                let body = Json(json!({ "error": err.payload() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
