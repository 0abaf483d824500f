//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `ASANA_CLIENT_ID` (required): OAuth client id registered with Asana
/// - `ASANA_CLIENT_SECRET` (required): OAuth client secret
/// - `ASANA_REDIRECT_URI` (required): callback URL registered with Asana
/// - `PORT` (optional): HTTP server port, defaults to 3000
/// - `ASANA_AUTH_URL`, `ASANA_TOKEN_URL`, `ASANA_API_BASE_URL` (optional): upstream endpoints
/// - `SESSION_TTL_HOURS` (optional): session lifetime, defaults to 24
/// - `STATIC_DIR` (optional): browser client directory, defaults to `public`
/// - `UPSTREAM_TIMEOUT_SECS` (optional): per-request upstream timeout, unset means none
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub asana_client_id: String,

    pub asana_client_secret: String,

    pub asana_redirect_uri: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_auth_url")]
    pub asana_auth_url: String,

    #[serde(default = "default_token_url")]
    pub asana_token_url: String,

    #[serde(default = "default_api_base_url")]
    pub asana_api_base_url: String,

    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default)]
    pub upstream_timeout_secs: Option<u64>,
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_auth_url() -> String {
    "https://app.asana.com/-/oauth_authorize".to_string()
}

fn default_token_url() -> String {
    "https://app.asana.com/-/oauth_token".to_string()
}

fn default_api_base_url() -> String {
    "https://app.asana.com/api/1.0".to_string()
}

fn default_session_ttl_hours() -> u32 {
    24
}

fn default_static_dir() -> String {
    "public".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., ASANA_CLIENT_ID)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: asana_client_id -> ASANA_CLIENT_ID
        envy::from_env::<Config>()
    }
}
