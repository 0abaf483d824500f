//! Asana OAuth Relay - Main Application Entry Point
//!
//! A server-side relay that logs a browser in to Asana with the OAuth 2.0 authorization-code flow, keeps the resulting tokens in a server-side session, and forwards task, workspace, project and user calls to the Asana API on the browser's behalf.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Sessions**: in-memory store keyed by an HttpOnly cookie
//! - **Upstream**: reqwest client, one Asana call per request
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the Asana client and session store
//! 3. Start the expired-session sweeper
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod error;
mod extract;
mod handlers;
mod middleware;
mod models;
mod services;
mod session_store;
mod state;
#[cfg(test)]
mod test_support;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// How often expired sessions are purged from the store.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Build the full application router.
///
/// Relay routes live under `/asana`; everything else is served from the
/// static client directory.
fn build_router(state: AppState) -> Router {
    // Routes that need a logged-in session
    let protected_routes = Router::new()
        .route("/me", get(handlers::users::me))
        .route("/task", post(handlers::tasks::create_task))
        .route(
            "/task/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route("/workspaces", get(handlers::workspaces::list_workspaces))
        .route("/tasks", get(handlers::tasks::list_tasks))
        .route("/projects", get(handlers::workspaces::list_projects))
        .route("/users", get(handlers::users::list_users))
        // Reject requests without a session token before any handler runs
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session::session_middleware,
        ));

    let asana_routes = Router::new()
        // OAuth flow (no session required)
        .route("/login", get(handlers::oauth::login))
        .route("/oauth/callback", get(handlers::oauth::oauth_callback))
        .merge(protected_routes);

    Router::new()
        .nest("/asana", asana_routes)
        // Browser client, including `/` where the OAuth callback lands
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    let port = config.port;
    tracing::info!("Configuration loaded");

    let state = AppState::from_config(config)?;
    tracing::info!("Asana client ready");

    // Periodically drop expired sessions
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.cleanup_expired().await;
        }
    });

    let app = build_router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
