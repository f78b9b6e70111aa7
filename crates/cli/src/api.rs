//! Client-facing front end for a node's group

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use peercache_cache::{Group, GroupStats};
use peercache_core::OCTET_STREAM;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    key: Option<String>,
}

/// `GET /api?key=` reads through the group; `GET /stats` reports its counters
pub fn router(group: Arc<Group>) -> Router {
    Router::new()
        .route("/api", get(get_value))
        .route("/stats", get(stats))
        .with_state(group)
}

async fn get_value(State(group): State<Arc<Group>>, Query(query): Query<ApiQuery>) -> Response {
    let key = query.key.unwrap_or_default();
    match group.get(&key).await {
        Ok(value) => ([(header::CONTENT_TYPE, OCTET_STREAM)], value.to_vec()).into_response(),
        Err(e) if e.is_invalid_argument() => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => {
            warn!(group = group.name(), key = %key, error = %e, "api request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn stats(State(group): State<Arc<Group>>) -> Json<GroupStats> {
    Json(group.stats())
}
