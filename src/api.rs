//! HTTP API for Linkshelf.
//!
//! Maps the REST routes onto `LinkManagerTrait` operations. Not-found
//! becomes 404, bad input 400, and store failures 500. Error bodies are
//! `{"error": "..."}`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::app::App;
use crate::managers::link_manager::LinkManagerTrait;
use crate::types::errors::StoreError;
use crate::types::link::{LinkPatch, NewLink};

/// Error returned by a handler, rendered as JSON.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => {
                error!(error = %other, "store failure");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Builds the router with all API routes.
pub fn router(app: App) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/collections", get(list_collections))
        .route("/api/links", post(create_link))
        .route(
            "/api/links/{id}",
            get(list_links).put(update_link).delete(delete_link),
        )
        .route("/api/links/toggle-read/{id}", put(toggle_read))
        .route("/api/search", get(search))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app)
}

/// Serves the API on an already-bound listener until the server stops.
pub async fn serve(app: App, listener: TcpListener) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("listening on http://{}", addr);
    }
    axum::serve(listener, router(app)).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn list_collections(State(app): State<App>) -> ApiResult<impl IntoResponse> {
    Ok(Json(app.links.list_collections().await?))
}

/// `id` is a collection id here; `"all"` lists every link.
async fn list_links(
    State(app): State<App>,
    Path(collection_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(app.links.list_links(&collection_id).await?))
}

async fn create_link(
    State(app): State<App>,
    body: Result<Json<NewLink>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = body?;
    let link = app.links.create_link(input).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

async fn delete_link(State(app): State<App>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    if app.links.delete_link(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Link not found: {}", id)))
    }
}

async fn update_link(
    State(app): State<App>,
    Path(id): Path<String>,
    body: Result<Json<LinkPatch>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(patch) = body?;
    let link = app
        .links
        .update_link(&id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Link not found: {}", id)))?;
    Ok(Json(json!({ "message": "Link updated.", "link": link })))
}

async fn toggle_read(State(app): State<App>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let link = app
        .links
        .toggle_read_status(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Link not found: {}", id)))?;
    Ok(Json(json!({ "message": "Read status changed.", "link": link })))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(
    State(app): State<App>,
    Query(params): Query<SearchParams>,
) -> ApiResult<impl IntoResponse> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("query parameter 'q' is required".to_string()))?;
    Ok(Json(app.links.search(&query).await?))
}
