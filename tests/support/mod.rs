// Stub civic-reporting backend used by the integration tests. Serves the
// same routes and envelope shapes as the real service, on an ephemeral port.
use std::collections::HashMap;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

pub fn app() -> Router {
    Router::new()
        .route("/api/reports/", get(list_reports).post(create_report))
        .route("/api/reports/{id}/", get(report_detail))
        .route("/api/seed/", post(seed))
        .route("/api/auth/signup/", post(signup))
        .route("/api/auth/login/", post(login))
}

// Bind an ephemeral port, serve the stub in the background, return the base.
pub async fn spawn_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app()).await.expect("stub server failed");
    });
    format!("http://{addr}")
}

// A base URL that refuses connections: bind a port, then let it go.
pub fn dead_candidate() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind throwaway port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}")
}

fn report(id: u64, title: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "title": title,
        "body": "Reported through the stub backend.",
        "image_url": null,
        "location": "Main Street",
        "comments": 0,
        "likes": 0,
        "shares": 0,
        "created_at": "2026-02-01T10:00:00Z"
    })
}

async fn list_reports(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page = params
        .get("page")
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(1);
    let body = if page <= 1 {
        json!({
            "count": 2,
            "next": "/api/reports/?page=2",
            "previous": null,
            "results": [
                report(1, "Pothole on Main Street", "Alex Chen"),
                report(2, "Broken street light", "Maria Rodriguez"),
            ]
        })
    } else {
        json!({
            "count": 2,
            "next": null,
            "previous": "/api/reports/",
            "results": []
        })
    };
    Json(body)
}

async fn report_detail(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    if id == 1 {
        (
            StatusCode::OK,
            Json(report(1, "Pothole on Main Street", "Alex Chen")),
        )
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."})))
    }
}

// Accepts both JSON and multipart bodies; the stub only cares that the
// submission arrived.
async fn create_report(_body: Bytes) -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(report(7, "garbage", "guest")))
}

async fn seed() -> Json<Value> {
    Json(json!({"detail": "Seeded"}))
}

async fn signup(body: Bytes) -> (StatusCode, Json<Value>) {
    let parsed: Value = serde_json::from_slice(&body).unwrap_or_default();
    if parsed["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"username": ["already taken"]})),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({"token": "stub-signup-token", "username": parsed["username"]})),
    )
}

async fn login(body: Bytes) -> (StatusCode, Json<Value>) {
    let parsed: Value = serde_json::from_slice(&body).unwrap_or_default();
    if parsed["password"] == "wrong" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["invalid credentials"]})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"token": "stub-login-token", "username": parsed["username"]})),
    )
}
