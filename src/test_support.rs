//! Test fixtures: configuration, state, and an in-process fake Asana.
//!
//! [`MockAsana`] binds an axum server to `127.0.0.1:0`, answers the handful
//! of Asana endpoints the relay uses, and records every request so tests can
//! assert what was (or was not) sent upstream.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{
    config::Config,
    session_store::{SESSION_COOKIE_NAME, SessionData},
    state::AppState,
};

pub const GOOD_CODE: &str = "good-code";
pub const ACCESS_TOKEN: &str = "access-123";
pub const REFRESH_TOKEN: &str = "refresh-456";

/// Configuration pointing at a fake server rooted at `origin`.
pub fn test_config(origin: &str) -> Config {
    Config {
        asana_client_id: "test-client".to_string(),
        asana_client_secret: "test-secret".to_string(),
        asana_redirect_uri: "http://localhost:3000/asana/oauth/callback".to_string(),
        port: 0,
        asana_auth_url: "https://app.asana.com/-/oauth_authorize".to_string(),
        asana_token_url: format!("{origin}/-/oauth_token"),
        asana_api_base_url: format!("{origin}/api/1.0"),
        session_ttl_hours: 1,
        static_dir: "tests-have-no-static-dir".to_string(),
        upstream_timeout_secs: Some(5),
    }
}

pub fn test_state(origin: &str) -> AppState {
    AppState::from_config(test_config(origin)).expect("client should build")
}

/// Store a logged-in session and return the matching `Cookie` header value.
pub async fn login(state: &AppState) -> String {
    let id = state
        .sessions
        .create(SessionData {
            access_token: Some(ACCESS_TOKEN.to_string()),
            refresh_token: Some(REFRESH_TOKEN.to_string()),
        })
        .await;
    format!("{SESSION_COOKIE_NAME}={id}")
}

/// One request as seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
pub struct MockAsana {
    pub origin: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockAsana {
    pub async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = requests.clone();

        let app = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| {
                let recorder = recorder.clone();
                async move {
                    let recorded = Recorded {
                        method,
                        path: uri.path().to_string(),
                        query: url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
                            .into_owned()
                            .collect(),
                        authorization: headers
                            .get(header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body: serde_json::from_slice(&body).ok(),
                    };
                    let response = respond(&recorded);
                    recorder.lock().unwrap().push(recorded);
                    response
                }
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            origin: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// The single recorded request; panics if there were none or several.
    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream call: {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

fn asana_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "errors": [{ "message": message }] }))).into_response()
}

/// Fake Asana routing.
///
/// Task id `missing` answers 404 with an error body, task id `broken`
/// answers 500 with an empty body.
fn respond(req: &Recorded) -> Response {
    if req.path == "/-/oauth_token" {
        return if req.query.get("code").map(String::as_str) == Some(GOOD_CODE) {
            Json(json!({
                "access_token": ACCESS_TOKEN,
                "refresh_token": REFRESH_TOKEN,
                "token_type": "bearer",
                "expires_in": 3600
            }))
            .into_response()
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_grant",
                    "error_description": "The provided authorization code is invalid."
                })),
            )
                .into_response()
        };
    }

    let expected = format!("Bearer {ACCESS_TOKEN}");
    if req.authorization.as_deref() != Some(expected.as_str()) {
        return asana_error(StatusCode::UNAUTHORIZED, "Not Authorized");
    }

    let Some(path) = req.path.strip_prefix("/api/1.0/") else {
        return asana_error(StatusCode::NOT_FOUND, "Unknown path");
    };
    let segments: Vec<&str> = path.split('/').collect();
    let data = |value: Value| Json(json!({ "data": value })).into_response();
    let echoed = || {
        req.body
            .as_ref()
            .and_then(|b| b.get("data"))
            .cloned()
            .unwrap_or_else(|| json!({}))
    };

    match (req.method.as_str(), segments.as_slice()) {
        (_, ["tasks", "missing"]) => asana_error(StatusCode::NOT_FOUND, "task: Not a recognized ID"),
        (_, ["tasks", "broken"]) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        ("GET", ["users", "me"]) => data(json!({ "gid": "u-me", "name": "Ada Lovelace" })),
        ("GET", ["users"]) => data(json!([{ "gid": "u1", "name": "Ada Lovelace" }])),
        ("GET", ["workspaces"]) => data(json!([{ "gid": "w1", "name": "Engineering" }])),
        ("GET", ["projects"]) => data(json!([{ "gid": "p1", "name": "Roadmap" }])),
        ("GET", ["tasks"]) => data(json!([{ "gid": "t1", "name": "Write docs" }])),
        ("GET", ["tasks", id]) => data(json!({ "gid": id, "name": "Write docs" })),
        ("POST", ["tasks"]) => {
            let mut task = echoed();
            task["gid"] = json!("t-new");
            (StatusCode::CREATED, Json(json!({ "data": task }))).into_response()
        }
        ("PUT", ["tasks", id]) => {
            let mut task = echoed();
            task["gid"] = json!(id);
            data(task)
        }
        ("DELETE", ["tasks", _]) => data(json!({})),
        _ => asana_error(StatusCode::NOT_FOUND, "Unknown path"),
    }
}

/// Drive the relay router with one request.
pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = crate::build_router(state)
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body should be readable");
    (status, headers, body)
}

pub fn json_body(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).expect("body should be JSON")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, cookie, None)
}

pub fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
