//! In-process stand-in for the Tekton Pipeline API
//!
//! Records every request it receives and answers with canned JSON, so tests
//! can assert both the request shape and the decoded response.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use reqwest::Url;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::TektonPipelineClient;

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Decoded query parameters in request order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Some(query) = &self.query else {
            return Vec::new();
        };
        let url = Url::parse(&format!("http://mock/?{}", query)).unwrap();
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<VecDeque<(u16, Value)>>>,
}

/// Mock API bound to an ephemeral local port
pub struct MockServer {
    url: String,
    state: MockState,
}

impl MockServer {
    /// Answer every request with the same status and body
    ///
    /// A `Value::Null` body means an empty response.
    pub async fn respond(status: u16, body: Value) -> Self {
        Self::sequence(vec![(status, body)]).await
    }

    /// Answer requests with the given responses in order; the last one repeats
    pub async fn sequence(responses: Vec<(u16, Value)>) -> Self {
        let state = MockState {
            requests: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(responses.into())),
        };

        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("http://{}/pipeline/v2", addr),
            state,
        }
    }

    /// Unauthenticated client pointed at this server
    pub fn client(&self) -> TektonPipelineClient {
        TektonPipelineClient::new(&self.url)
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The only request received; fails the test otherwise
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: header("content-type"),
        accept: header("accept"),
        authorization: header("authorization"),
        body: serde_json::from_slice(&body).ok(),
    });

    let (status, body) = {
        let mut responses = state.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.pop_front().unwrap()
        } else {
            responses.front().cloned().unwrap_or((404, Value::Null))
        }
    };

    let status = StatusCode::from_u16(status).unwrap();
    if body.is_null() {
        status.into_response()
    } else {
        (status, Json(body)).into_response()
    }
}

/// Minimal pipeline payload
pub fn pipeline_json(id: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": "tekton-pipeline",
        "status": "configured",
        "resource_group": { "id": "6a9a01f2cff54a7f966f803d92877123" },
        "toolchain": { "id": "bf5fa00f-ddef-4298-b87b-aa8b6da0e1a6" },
        "definitions": [],
        "properties": [],
        "triggers": [],
        "worker": { "id": "public", "name": "IBM Managed workers", "type": "public" },
        "build_number": 1,
        "next_build_number": 2,
        "enable_notifications": false,
        "enable_partial_cloning": false,
        "enabled": true,
        "created_at": "2019-01-01T12:00:00.000Z",
        "updated_at": "2019-01-01T12:00:00.000Z"
    })
}

/// Minimal pipeline run payload
pub fn run_json(id: &str, status: &str) -> Value {
    serde_json::json!({
        "id": id,
        "status": status,
        "user_info": { "iam_id": "IBMid-123" },
        "definition_id": "d1",
        "worker": { "id": "public" },
        "pipeline_id": "p1",
        "listen_for": "listener",
        "trigger": { "type": "manual", "id": "t1", "name": "start" },
        "properties": [],
        "created_at": "2019-01-01T12:00:00.000Z"
    })
}

/// Minimal trigger payload
pub fn trigger_json(id: &str, name: &str) -> Value {
    serde_json::json!({
        "type": "manual",
        "id": id,
        "name": name,
        "event_listener": "listener",
        "properties": [],
        "tags": [],
        "enabled": true
    })
}

/// Minimal property payload
pub fn property_json(name: &str, kind: &str, value: &str) -> Value {
    serde_json::json!({ "name": name, "type": kind, "value": value })
}
