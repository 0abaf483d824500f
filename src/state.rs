//! Shared application state handed to every handler.

use std::{sync::Arc, time::Duration};

use crate::{config::Config, services::asana_client::AsanaClient, session_store::SessionStore};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub asana: AsanaClient,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (e.g. the
    /// TLS backend fails to initialise).
    pub fn from_config(config: Config) -> Result<Self, reqwest::Error> {
        let asana = AsanaClient::new(
            &config.asana_api_base_url,
            config.upstream_timeout_secs.map(Duration::from_secs),
        )?;

        Ok(Self {
            sessions: SessionStore::new(config.session_ttl_hours),
            asana,
            config: Arc::new(config),
        })
    }
}
