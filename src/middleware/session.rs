//! Session gate middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Read the session id from the session cookie
//! 2. Look the session up in the store
//! 3. Inject the access token into the request
//! 4. Reject requests without a token with HTTP 401, before any upstream call

use crate::{error::AppError, session_store::SESSION_COOKIE_NAME, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

/// Session context attached to authorized requests.
///
/// Inserted into the request's extension map; handlers extract it with
/// `Extension<SessionContext>`.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Asana bearer token for this browser
    pub access_token: String,
}

/// Resolve the session behind a cookie jar to an access token.
///
/// Returns `Err(AppError::NotLoggedIn)` when there is no cookie, no live
/// session, or a session without a non-empty access token.
pub async fn require_session(
    state: &AppState,
    jar: &CookieJar,
) -> Result<SessionContext, AppError> {
    let session_id = jar
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value())
        .ok_or(AppError::NotLoggedIn)?;

    let access_token = state
        .sessions
        .get(session_id)
        .await
        .and_then(|data| data.access_token)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::NotLoggedIn)?;

    Ok(SessionContext { access_token })
}

/// Session gate middleware function.
///
/// # Flow
///
/// 1. Resolve the session cookie to a `SessionContext`
/// 2. If found: inject it into the request, call next handler
/// 3. If not found: return 401 `Not logged in`
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let context = match require_session(&state, &jar).await {
        Ok(context) => context,
        Err(err) => {
            tracing::debug!(
                "Rejected {} {}: no session token",
                request.method(),
                request.uri().path()
            );
            return Err(err);
        }
    };

    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
