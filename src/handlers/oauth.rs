//! OAuth login HTTP handlers.
//!
//! This module implements the two public endpoints of the login flow:
//! - GET /asana/login - Redirect the browser to Asana's consent page
//! - GET /asana/oauth/callback - Exchange the code and start a session

use crate::{
    error::AppError,
    models::query::CallbackQuery,
    services::oauth_service,
    session_store::{SESSION_COOKIE_NAME, SessionData},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

/// `302 Found` to `location`.
fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Start the OAuth flow.
///
/// # Endpoint
///
/// `GET /asana/login`
///
/// # Response
///
/// - **302 Found**: `Location` is Asana's authorization URL carrying the
///   configured client id and redirect URI
pub async fn login(State(state): State<AppState>) -> Response {
    found(oauth_service::authorize_url(&state.config))
}

/// Finish the OAuth flow.
///
/// # Endpoint
///
/// `GET /asana/oauth/callback?code=...`
///
/// # Response
///
/// - **302 Found** to `/`: tokens stored in a new session, session cookie set
///   (any session the browser already had is discarded)
/// - **Error (400)**: `{"error": <token endpoint error body or message>}`
///
/// A missing `code` is sent upstream as an empty code and fails there.
pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Response), AppError> {
    let code = query.code.unwrap_or_default();

    let tokens = oauth_service::exchange_code(&state.asana, &state.config, &code).await?;

    // Never keep a pre-login id: the new tokens always get a fresh session.
    if let Some(previous) = jar.get(SESSION_COOKIE_NAME) {
        state.sessions.remove(previous.value()).await;
    }
    let session_id = state
        .sessions
        .create(SessionData {
            access_token: Some(tokens.access_token),
            refresh_token: tokens.refresh_token,
        })
        .await;
    tracing::info!("Asana login completed, session established");

    let cookie = Cookie::build((SESSION_COOKIE_NAME, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), found("/".to_string())))
}
