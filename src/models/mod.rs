//! Request, response and upstream payload types.
//!
//! Asana entities are opaque to the relay, so task bodies stay
//! `serde_json::Value` and only the shapes the relay itself builds are typed.

/// `{"data": ...}` envelope
pub mod envelope;
/// Query-string extractors
pub mod query;
/// Task create/update bodies
pub mod task;
/// OAuth token exchange
pub mod token;
