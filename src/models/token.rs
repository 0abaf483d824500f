//! OAuth token exchange models.

use serde::{Deserialize, Serialize};

/// Query parameters sent to the token endpoint.
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub code: &'a str,
}

/// Token endpoint response.
///
/// Asana also returns `expires_in`, `token_type` and a `data` user object;
/// only the two tokens are kept.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub refresh_token: Option<String>,
}
