//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Gate requests on session state
//! - Short-circuit requests (reject unauthenticated browsers)

/// Session gate middleware
pub mod session;
