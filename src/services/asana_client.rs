//! Asana HTTP client.
//!
//! Thin wrapper around a shared `reqwest::Client` that attaches the session's
//! bearer token, checks the response status, and turns every failure into an
//! [`UpstreamError`]. Each relay handler makes exactly one call through here.
//!
//! # Error Mapping
//!
//! - Non-2xx response → `UpstreamError::Status` with the response body
//!   (parsed as JSON when possible, raw text otherwise)
//! - Transport or decoding failure → `UpstreamError::Network` with the message

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::models::{
    envelope::DataEnvelope,
    token::{TokenRequest, TokenResponse},
};

/// Failure of a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    ///
    /// `body` is `None` when the response had no body.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },

    /// The request never produced a usable response.
    #[error("{0}")]
    Network(String),
}

impl UpstreamError {
    /// Payload relayed to the browser under the `error` key.
    ///
    /// The upstream body when present, otherwise the error message.
    pub fn payload(&self) -> Value {
        match self {
            UpstreamError::Status {
                body: Some(body), ..
            } => body.clone(),
            _ => Value::String(self.to_string()),
        }
    }

    async fn from_response(response: Response) -> Self {
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) if text.is_empty() => None,
            Ok(text) => Some(serde_json::from_str(&text).unwrap_or(Value::String(text))),
            Err(_) => None,
        };
        UpstreamError::Status { status, body }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        // The token exchange carries the client secret in its query string.
        UpstreamError::Network(err.without_url().to_string())
    }
}

/// Client for the Asana REST API and OAuth token endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AsanaClient {
    http: Client,
    base_url: String,
}

impl AsanaClient {
    /// Build a client for the API rooted at `base_url`.
    ///
    /// `timeout` bounds each request end to end; `None` keeps reqwest's
    /// default of no timeout.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and return the whole response body.
    pub async fn get(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, UpstreamError> {
        let request = self.http.get(self.url(path)).query(query).bearer_auth(token);
        self.send_json(request).await
    }

    /// GET `path` and return only the `data` member of the response body.
    pub async fn get_data(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, UpstreamError> {
        let request = self.http.get(self.url(path)).query(query).bearer_auth(token);
        let envelope: DataEnvelope<Value> = self.send_json(request).await?;
        Ok(envelope.data)
    }

    /// POST a JSON body to `path`.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<Value, UpstreamError> {
        let request = self.http.post(self.url(path)).json(body).bearer_auth(token);
        self.send_json(request).await
    }

    /// PUT a JSON body to `path`.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<Value, UpstreamError> {
        let request = self.http.put(self.url(path)).json(body).bearer_auth(token);
        self.send_json(request).await
    }

    /// DELETE `path`, discarding the response body.
    pub async fn delete(&self, token: &str, path: &str) -> Result<(), UpstreamError> {
        let request = self.http.delete(self.url(path)).bearer_auth(token);
        self.send(request).await?;
        Ok(())
    }

    /// Exchange an authorization code at the OAuth token endpoint.
    ///
    /// Parameters travel in the query string with an empty body, which is
    /// what Asana's token endpoint accepts.
    pub async fn request_token(
        &self,
        token_url: &str,
        params: &TokenRequest<'_>,
    ) -> Result<TokenResponse, UpstreamError> {
        let request = self.http.post(token_url).query(params);
        self.send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, UpstreamError> {
        let response = request.send().await.map_err(|e| {
            let err = UpstreamError::from(e);
            tracing::error!("Asana request failed: {}", err);
            err
        })?;

        if !response.status().is_success() {
            let err = UpstreamError::from_response(response).await;
            tracing::error!("Asana returned an error: {} {}", err, err.payload());
            return Err(err);
        }

        Ok(response)
    }
}
