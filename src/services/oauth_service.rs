//! OAuth 2.0 authorization-code flow against Asana.
//!
//! - [`authorize_url`] builds the URL the browser is sent to on login
//! - [`exchange_code`] trades the callback's code for access/refresh tokens

use crate::{
    config::Config,
    models::token::{TokenRequest, TokenResponse},
    services::asana_client::{AsanaClient, UpstreamError},
};

/// Build the Asana authorization URL.
///
/// Configured values are URL-encoded but otherwise not validated; a bad
/// `ASANA_AUTH_URL` simply yields a bad redirect.
pub fn authorize_url(config: &Config) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &config.asana_client_id)
        .append_pair("redirect_uri", &config.asana_redirect_uri)
        .append_pair("response_type", "code")
        .finish();

    format!("{}?{}", config.asana_auth_url, query)
}

/// Exchange an authorization code for tokens.
///
/// # Errors
///
/// - `UpstreamError::Status`: the token endpoint rejected the code
/// - `UpstreamError::Network`: the endpoint could not be reached or its
///   response could not be decoded
pub async fn exchange_code(
    client: &AsanaClient,
    config: &Config,
    code: &str,
) -> Result<TokenResponse, UpstreamError> {
    let params = TokenRequest {
        grant_type: "authorization_code",
        client_id: &config.asana_client_id,
        client_secret: &config.asana_client_secret,
        redirect_uri: &config.asana_redirect_uri,
        code,
    };

    client.request_token(&config.asana_token_url, &params).await
}
