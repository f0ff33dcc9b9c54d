//! Integration tests for concurrent requests against the SQLite-backed API.
//!
//! Each request opens its own storage session; these tests check that
//! interleaved sessions neither duplicate IDs nor lose writes.

use std::collections::HashSet;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use todo_server::config::DEFAULT_CORS_ORIGIN;
use todo_server::router::build_router;
use todo_server::state::AppState;

/// The returned directory holds the database file; keep it alive for the
/// whole test.
fn test_app() -> (TempDir, Router) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let state = AppState::open(&dir.path().join("todos.db")).expect("failed to open AppState");
    (dir, build_router(state, HeaderValue::from_static(DEFAULT_CORS_ORIGIN)))
}

async fn request_json(
    app: Router,
    method: Method,
    path: String,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_unique_ids() {
    let (_dir, app) = test_app();

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                request_json(
                    app,
                    Method::POST,
                    "/todos".to_string(),
                    Some(json!({ "text": format!("todo {i}") })),
                )
                .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK, "create failed: {:?}", body);
        assert!(ids.insert(body["id"].as_i64().unwrap()));
    }

    let (status, all) = request_json(app, Method::GET, "/todos".to_string(), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: HashSet<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_toggles_are_not_lost() {
    let (_dir, app) = test_app();
    let (_, created) = request_json(
        app.clone(),
        Method::POST,
        "/todos".to_string(),
        Some(json!({ "text": "contended" })),
    )
    .await;
    let path = format!("/todos/{}", created["id"]);

    // An even number of atomic flips must land back on the original value.
    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let app = app.clone();
            let path = path.clone();
            tokio::spawn(async move { request_json(app, Method::PATCH, path, None).await })
        })
        .collect();

    let mut completed_responses = 0;
    for task in tasks {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK, "toggle failed: {:?}", body);
        if body["completed"] == true {
            completed_responses += 1;
        }
    }
    assert_eq!(completed_responses, 10);

    let (_, all) = request_json(app, Method::GET, "/todos".to_string(), None).await;
    assert_eq!(all, json!([created]));
}
