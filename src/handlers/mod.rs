//! HTTP request handlers (route handlers).
//!
//! Each relay handler is an async function that:
//! 1. Receives the session context and request data (path, query, JSON body)
//! 2. Makes exactly one call to Asana
//! 3. Returns the (possibly unwrapped) Asana response or an `AppError`
/// OAuth login flow
pub mod oauth;
/// Task endpoints
pub mod tasks;
/// Current user and workspace users
pub mod users;
/// Workspaces and projects
pub mod workspaces;
