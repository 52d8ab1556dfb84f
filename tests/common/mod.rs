#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use sqlab::catalog::ExerciseCatalog;
use sqlab::db::{self, LabStorage};
use sqlab::router::{LabState, lab_router};
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use url::form_urlencoded;

const TEST_SECRET: &str = "sqlab-test-cookie-secret-0123456789abcdefghijklmnopqrstuvwxyz-0123";

pub struct TestApp {
    pub app: Router,
    pub storage: LabStorage,
    db_path: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

/// Build a router over a fresh seeded database in a unique temp file.
pub async fn spawn_app() -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "sqlab-test-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", db_path.display());
    let pool = db::connect(&database_url)
        .await
        .expect("failed to open sqlite database");
    let storage = LabStorage::new(pool);
    storage.init_schema().await.expect("failed to init schema");
    storage.seed_if_empty().await.expect("failed to seed");

    let state = LabState::new(storage.clone(), ExerciseCatalog::builtin(), TEST_SECRET);
    TestApp {
        app: lab_router(state),
        storage,
        db_path,
    }
}

/// Encode form fields as an application/x-www-form-urlencoded body.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Encode a single query parameter, payload quotes and spaces included.
pub fn query_string(key: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

/// Acknowledge the legal warning and return the cookie to replay on
/// subsequent vulnerable-route requests.
pub async fn acknowledge(app: &Router) -> String {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/acknowledge-warning")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("no acknowledgement cookie set")
        .to_str()
        .expect("cookie header was not utf-8");
    set_cookie
        .split(';')
        .next()
        .expect("empty set-cookie header")
        .to_string()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn post_form(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("failed to build request")
}

pub fn post_form_with_cookie(uri: &str, body: String, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .expect("failed to build request")
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

/// Count attempt-log rows for an exercise, success or not.
pub async fn attempt_count(storage: &LabStorage, exercise_name: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM exercise_logs WHERE exercise_name = ?")
        .bind(exercise_name)
        .fetch_one(storage.pool())
        .await
        .expect("failed to count attempts")
}
