/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A record store in a throwaway directory behind a running dispatcher
/// - A stub post source with canned answers
/// - Request helpers that return status and parsed JSON

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use roster_api::app::{build_router, AppState};
use roster_api::config::Config;
use roster_shared::db::pool::DatabaseConfig;
use roster_shared::remote::{Post, PostSource, TransportError};
use roster_shared::store::Store;
use roster_worker::controller::Controller;
use roster_worker::dispatcher::Dispatcher;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// Post source answering from memory
pub enum StubPosts {
    /// Serves these posts
    Serve(Vec<Post>),

    /// Fails every call with this error
    Fail(TransportError),
}

#[async_trait]
impl PostSource for StubPosts {
    async fn list_posts(&self) -> Result<Vec<Post>, TransportError> {
        match self {
            StubPosts::Serve(posts) => Ok(posts.clone()),
            StubPosts::Fail(err) => Err(err.clone()),
        }
    }

    async fn get_post(&self, id: i64) -> Result<Post, TransportError> {
        match self {
            StubPosts::Serve(posts) => posts
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or(TransportError::Status(404)),
            StubPosts::Fail(err) => Err(err.clone()),
        }
    }
}

/// A sample post
pub fn post(id: i64, title: &str) -> Post {
    Post {
        user_id: Some(1),
        id,
        title: title.to_string(),
        body: format!("body of {}", title),
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    dispatcher: Option<Dispatcher>,
    _dir: TempDir,
}

impl TestContext {
    /// Creates a context with an empty store and two stub posts
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_posts(StubPosts::Serve(vec![post(1, "first"), post(2, "second")])).await
    }

    /// Creates a context with an empty store and the given post source
    pub async fn with_posts(posts: StubPosts) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let store = Store::open(DatabaseConfig::for_path(dir.path().join("api.db"))).await?;
        let db = store.pool().clone();

        let dispatcher = Dispatcher::spawn(Controller::new(store));
        let config = Config::from_lookup(|_| None)?;

        let state = AppState::new(db, dispatcher.handle(), Arc::new(posts), config);
        let app = build_router(state);

        Ok(TestContext {
            app,
            dispatcher: Some(dispatcher),
            _dir: dir,
        })
    }

    /// Stops the dispatcher task; the router stays up
    pub async fn stop_dispatcher(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.shutdown().await;
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    ///
    /// An empty body parses as `Value::Null`.
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    /// Creates a record through the API and returns its id
    pub async fn create(&self, form: Value) -> i64 {
        let (status, body) = self.request("POST", "/v1/records", Some(form)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["id"].as_i64().expect("id in create response")
    }
}

/// A valid record form
pub fn form(name: &str, email: &str, city: &str) -> Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "phone": "5551234567",
        "age": "30",
        "city": city,
        "gender": "Female",
        "accepted_terms": true
    })
}
