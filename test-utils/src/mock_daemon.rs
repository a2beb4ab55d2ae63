//! Stand-in for a node daemon.
//!
//! `MockDaemon` serves the daemon REST endpoints the panel uses on an ephemeral local
//! port, answers with configurable envelopes and records every request it receives.

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, task::JoinHandle};

use crate::error::TestError;

/// Address no daemon listens on; calls to it fail with a transport error.
pub fn unreachable_endpoint() -> (String, i32) {
    ("127.0.0.1".to_string(), 1)
}

/// One request received by the mock daemon.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Value of the `Authorization` header, if sent.
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    /// Parses the body as JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A configured `success: false` answer.
#[derive(Debug, Clone)]
struct Rejection {
    msg: String,
    code: String,
}

#[derive(Debug, Default)]
struct MockConfig {
    reject_create: Option<Rejection>,
    reject_delete: Option<Rejection>,
    reject_network: Option<Rejection>,
    network: Map<String, Value>,
    templates: Option<Value>,
}

#[derive(Default)]
struct MockState {
    config: Mutex<MockConfig>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    fn config(&self) -> MutexGuard<'_, MockConfig> {
        self.config.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn requests(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Running mock daemon; the server task stops when this is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let daemon = MockDaemon::start().await?;
/// daemon.reject_create("Server already exists", "ALREADY_EXISTS");
///
/// // ... point a node at daemon.host()/daemon.port() and run the code under test
///
/// assert_eq!(daemon.requests_matching(Method::PUT, "/server/").len(), 1);
/// ```
pub struct MockDaemon {
    addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockDaemon {
    /// Binds `127.0.0.1:0` and starts serving.
    ///
    /// By default every call succeeds, `/network` reports no servers and
    /// `/_templates` returns an empty object.
    ///
    /// # Returns
    /// - `Ok(MockDaemon)` - Running daemon
    /// - `Err(TestError::MockDaemon)` - Failed to bind the listener
    pub async fn start() -> Result<Self, TestError> {
        let state = Arc::new(MockState::default());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = Router::new()
            .fallback(handle_request)
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> i32 {
        i32::from(self.addr.port())
    }

    /// Makes `PUT /server/{hash}` answer `success: false`.
    pub fn reject_create(&self, msg: &str, code: &str) {
        self.state.config().reject_create = Some(Rejection {
            msg: msg.to_string(),
            code: code.to_string(),
        });
    }

    /// Makes `DELETE /server/{hash}` answer `success: false`.
    pub fn reject_delete(&self, msg: &str, code: &str) {
        self.state.config().reject_delete = Some(Rejection {
            msg: msg.to_string(),
            code: code.to_string(),
        });
    }

    /// Makes `GET /network` answer `success: false`.
    pub fn reject_network(&self, msg: &str, code: &str) {
        self.state.config().reject_network = Some(Rejection {
            msg: msg.to_string(),
            code: code.to_string(),
        });
    }

    /// Sets the status `GET /network` reports for a server hash.
    pub fn set_status(&self, hash: &str, status: Value) {
        self.state.config().network.insert(hash.to_string(), status);
    }

    /// Sets the body returned by `GET /_templates`.
    pub fn set_templates(&self, templates: Value) {
        self.state.config().templates = Some(templates);
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests().clone()
    }

    /// Requests with `method` whose path starts with `path_prefix`.
    pub fn requests_matching(&self, method: Method, path_prefix: &str) -> Vec<RecordedRequest> {
        self.state
            .requests()
            .iter()
            .filter(|r| r.method == method && r.path.starts_with(path_prefix))
            .cloned()
            .collect()
    }
}

impl Drop for MockDaemon {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        query: query.clone(),
        authorization,
        body,
    });

    let config = state.config();
    let segments: Vec<&str> = uri.path().trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (Method::GET, ["network"]) => {
            if let Some(rejection) = &config.reject_network {
                return rejected(rejection);
            }

            let ids = query
                .iter()
                .find(|(k, _)| k == "ids")
                .map(|(_, v)| v.clone())
                .unwrap_or_default();

            let data: Map<String, Value> = ids
                .split(',')
                .filter_map(|hash| {
                    config
                        .network
                        .get(hash)
                        .map(|status| (hash.to_string(), status.clone()))
                })
                .collect();

            Json(json!({ "success": true, "data": data })).into_response()
        }
        (Method::PUT, ["server", _]) => match &config.reject_create {
            Some(rejection) => rejected(rejection),
            None => ok(),
        },
        (Method::DELETE, ["server", _]) => match &config.reject_delete {
            Some(rejection) => rejected(rejection),
            None => ok(),
        },
        (Method::POST, ["server", _, "install"]) => ok(),
        (Method::GET, ["_templates"]) => {
            Json(config.templates.clone().unwrap_or_else(|| json!({}))).into_response()
        }
        _ => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

fn ok() -> Response {
    Json(json!({ "success": true })).into_response()
}

fn rejected(rejection: &Rejection) -> Response {
    Json(json!({
        "success": false,
        "msg": rejection.msg,
        "code": rejection.code,
    }))
    .into_response()
}
