//! HTTP transport: maps requests onto the four facade operations.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /messages`: add. Body = `{ "title": ..., "content": ... }`.
//! - `GET /messages/:id`: read.
//! - `PUT /messages/:id`: edit. Body = `{ "content": ... }`.
//! - `DELETE /messages/:id`: delete.
//! - `GET /health`: `{ "ok": true }`.
//!
//! The caller comes from the `x-caller-name` and `x-caller-role` headers.
//! Responses are the serialized [`OperationResult`]:
//! `{ "status": "Success" | "Error", "message": ... }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use news_proxy::{http, InMemoryContentStore, NewsFacade};
//!
//! let facade = Arc::new(NewsFacade::new(InMemoryContentStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(facade.clone());
//!
//! // Or serve directly
//! http::serve(facade, "0.0.0.0:3000").await?;
//! ```

mod caller;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::NewsFacade;
use crate::response::{OperationError, OperationResult, Status};
use crate::store::ContentStore;

pub use caller::{caller_from_headers, NAME_HEADER, ROLE_HEADER};

/// Body of `POST /messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMessageBody {
    pub title: String,
    pub content: String,
}

/// Body of `PUT /messages/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMessageBody {
    pub content: String,
}

/// Build an axum `Router` serving the given facade.
pub fn router<S: ContentStore + 'static>(facade: Arc<NewsFacade<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/messages", post(add_handler::<S>))
        .route(
            "/messages/:id",
            get(read_handler::<S>)
                .put(edit_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(facade)
}

/// Serve the facade over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S: ContentStore + 'static>(
    facade: Arc<NewsFacade<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(facade);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "serving news facade");
    axum::serve(listener, app).await
}

/// HTTP status for a facade result.
pub fn status_code(result: &OperationResult) -> StatusCode {
    match result.error() {
        None => StatusCode::OK,
        Some(OperationError::AccessDenied(_)) => StatusCode::FORBIDDEN,
        Some(OperationError::NotFound) => StatusCode::NOT_FOUND,
        Some(OperationError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn respond(result: OperationResult) -> Response {
    (status_code(&result), Json(result)).into_response()
}

fn bad_request(message: String) -> Response {
    let body = json!({ "status": Status::Error, "message": message });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// `GET /health` returns `{ "ok": true }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `POST /messages`
async fn add_handler<S: ContentStore + 'static>(
    State(facade): State<Arc<NewsFacade<S>>>,
    headers: HeaderMap,
    Json(body): Json<AddMessageBody>,
) -> Response {
    match caller_from_headers(&headers) {
        Ok(caller) => respond(facade.add_message(&body.title, &body.content, &caller)),
        Err(e) => bad_request(e.to_string()),
    }
}

/// `GET /messages/:id`
async fn read_handler<S: ContentStore + 'static>(
    State(facade): State<Arc<NewsFacade<S>>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    match caller_from_headers(&headers) {
        Ok(caller) => respond(facade.read_message(id, &caller)),
        Err(e) => bad_request(e.to_string()),
    }
}

/// `PUT /messages/:id`
async fn edit_handler<S: ContentStore + 'static>(
    State(facade): State<Arc<NewsFacade<S>>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<EditMessageBody>,
) -> Response {
    match caller_from_headers(&headers) {
        Ok(caller) => respond(facade.edit_message(id, &body.content, &caller)),
        Err(e) => bad_request(e.to_string()),
    }
}

/// `DELETE /messages/:id`
async fn delete_handler<S: ContentStore + 'static>(
    State(facade): State<Arc<NewsFacade<S>>>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    match caller_from_headers(&headers) {
        Ok(caller) => respond(facade.delete_message(id, &caller)),
        Err(e) => bad_request(e.to_string()),
    }
}
