//! Upstream services.
//!
//! Services hold the outbound side of the relay, separated from HTTP handlers:
//! the Asana API client and the OAuth code exchange.

pub mod asana_client;
pub mod oauth_service;
