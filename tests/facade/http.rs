//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use news_proxy::http::{self, NAME_HEADER, ROLE_HEADER};
use news_proxy::{InMemoryContentStore, NewsFacade};
use serde_json::{json, Value};

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let facade = Arc::new(NewsFacade::new(InMemoryContentStore::new()));
    let app = http::router(facade);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn body(resp: reqwest::Response) -> Value {
    resp.json().await.unwrap()
}

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body(resp).await, json!({ "ok": true }));
}

#[tokio::test]
async fn scenario_over_http() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/messages"))
        .header(NAME_HEADER, "John")
        .header(ROLE_HEADER, "user")
        .json(&json!({ "title": "Title", "content": "Content" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        body(resp).await,
        json!({ "status": "Success", "message": "Message added successfully." })
    );

    let resp = client
        .get(format!("{base}/messages/1"))
        .header(ROLE_HEADER, "guest")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body(resp).await["message"], "Title: Content");

    let resp = client
        .put(format!("{base}/messages/1"))
        .header(ROLE_HEADER, "moderator")
        .json(&json!({ "content": "Updated content" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(format!("{base}/messages/1"))
        .header(ROLE_HEADER, "user")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(
        body(resp).await,
        json!({
            "status": "Error",
            "message": "Access denied: insufficient permissions to delete a message."
        })
    );

    let resp = client
        .delete(format!("{base}/messages/1"))
        .header(ROLE_HEADER, "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{base}/messages/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(body(resp).await["message"], "Message not found.");
}

#[tokio::test]
async fn missing_role_header_means_guest() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/messages"))
        .json(&json!({ "title": "Title", "content": "Content" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn unknown_role_is_bad_request() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/messages/1"))
        .header(ROLE_HEADER, "overlord")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body(resp).await,
        json!({ "status": "Error", "message": "unknown role: overlord" })
    );
}
