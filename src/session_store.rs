//! In-memory browser session store.
//!
//! Sessions are keyed by a random UUID that travels in the
//! [`SESSION_COOKIE_NAME`] cookie. Each entry holds the Asana tokens obtained
//! at the OAuth callback and an expiry timestamp; expired entries read as
//! absent and are dropped by [`SessionStore::cleanup_expired`].
//!
//! Ids are only ever issued by [`SessionStore::create`], so a browser cannot
//! choose the id its tokens are stored under.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Cookie carrying the session id.
pub const SESSION_COOKIE_NAME: &str = "asana_relay_session";

/// Tokens held for one browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub access_token: Option<String>,

    /// Stored but never used; token refresh is not automated.
    pub refresh_token: Option<String>,
}

#[derive(Debug)]
struct Entry {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// Shared session store. Clones share the same map.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
    /// Session validity period
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_hours: u32) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::hours(i64::from(ttl_hours)),
        }
    }

    /// Look up a live session.
    pub async fn get(&self, id: &str) -> Option<SessionData> {
        let sessions = self.sessions.read().await;
        let now = Utc::now();

        sessions
            .get(id)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.data.clone())
    }

    /// Store `data` under a freshly issued id and return that id.
    pub async fn create(&self, data: SessionData) -> String {
        let id = Uuid::new_v4().to_string();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), Entry { data, expires_at });

        id
    }

    /// Forget a session. Unknown ids are ignored.
    pub async fn remove(&self, id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
    }

    /// Drop every expired session.
    pub async fn cleanup_expired(&self) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
