//! Shared helpers: an in-process fake of the Clerk create-user endpoint

#![allow(dead_code)]

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Email answered with a duplicate-email 422
pub const TAKEN_EMAIL: &str = "taken@example.com";
/// Email answered with a generic 422
pub const INVALID_EMAIL: &str = "not-an-email";
/// Email answered with a 500
pub const BROKEN_EMAIL: &str = "boom@example.com";

/// A request as seen by the fake server
#[derive(Debug, Clone)]
pub struct Received {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct FakeClerk {
    received: Arc<Mutex<Vec<Received>>>,
}

impl FakeClerk {
    pub async fn received(&self) -> Vec<Received> {
        self.received.lock().await.clone()
    }

    pub async fn emails(&self) -> Vec<String> {
        self.received()
            .await
            .iter()
            .filter_map(|r| r.body["email_address"][0].as_str().map(str::to_string))
            .collect()
    }
}

async fn create_user(
    State(state): State<FakeClerk>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.received.lock().await.push(Received {
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: body.clone(),
    });

    match body["email_address"][0].as_str().unwrap_or_default() {
        TAKEN_EMAIL => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "errors": [{
                    "message": "That email address is taken. Please try another.",
                    "long_message": "That email_address already exists. Please try another.",
                    "code": "form_identifier_exists",
                    "meta": { "param_name": "email_address" }
                }]
            })),
        ),
        INVALID_EMAIL => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "errors": [{
                    "message": "is invalid",
                    "long_message": "email_address must be a valid email address.",
                    "code": "form_param_format_invalid"
                }]
            })),
        ),
        BROKEN_EMAIL => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "errors": [{ "message": "internal error" }] })),
        ),
        email => (
            StatusCode::OK,
            Json(json!({ "object": "user", "id": "user_123", "email": email })),
        ),
    }
}

/// Start the fake server, returning its base URL (ending in `/v1`)
pub async fn start_fake_clerk() -> (String, FakeClerk) {
    let state = FakeClerk::default();
    let app = Router::new()
        .route("/v1/users", post(create_user))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), state)
}

/// A localhost port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
