//! Shared fixture for request-level API tests: a store in a temp data
//! directory wired into the real router, driven through tower oneshot.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use todos::config::PolicyConfig;
use todos::http::{router, AppState};
use todos::store::Store;
use todos::user::User;

pub struct TestApp {
    pub store: Arc<Store>,
    router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(PolicyConfig::default())
    }

    pub fn with_policy(policy: PolicyConfig) -> Self {
        let dir = TempDir::new().expect("temp data dir");
        let store = Arc::new(Store::open(dir.path()).expect("open store"));
        let router = router(AppState {
            store: Arc::clone(&store),
            policy,
        });
        Self {
            store,
            router,
            _dir: dir,
        }
    }

    pub fn add_user(&self, username: &str) -> User {
        self.store
            .insert_user(User::new(
                username,
                username,
                format!("{username}@example.com"),
            ))
            .expect("insert user")
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        actor: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor) = actor {
            builder = builder.header("x-user-id", actor);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, actor: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(actor), None).await
    }

    pub async fn post(&self, uri: &str, actor: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(actor), Some(body)).await
    }

    pub async fn put(&self, uri: &str, actor: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(actor), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, actor: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(actor), None).await
    }

    /// Create a task through the API and return its id
    pub async fn create_task(&self, actor: &str, body: Value) -> String {
        let (status, response) = self.post("/api/todos", actor, body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {response}");
        response["data"]["id"]
            .as_str()
            .expect("created task id")
            .to_string()
    }
}
