//! Server side: answer peers asking for values this node owns

use crate::protocol::Response as WireResponse;
use crate::registry::GroupRegistry;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use peercache_core::{Error, Result, OCTET_STREAM};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

pub(super) fn router(base_path: &str, registry: GroupRegistry) -> Router {
    Router::new()
        .route(&format!("{base_path}:group/:key"), get(handle_get))
        .with_state(registry)
}

async fn handle_get(
    State(registry): State<GroupRegistry>,
    Path((group_name, key)): Path<(String, String)>,
) -> Response {
    debug!(group = %group_name, key = %key, "peer request");

    let Some(group) = registry.get(&group_name) else {
        let err = Error::group_not_found(&group_name);
        return (StatusCode::NOT_FOUND, err.to_string()).into_response();
    };

    let value = match group.get(&key).await {
        Ok(value) => value,
        Err(e) => {
            error!(group = %group_name, key = %key, error = %e, "failed to serve peer request");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    match (WireResponse { value: value.to_vec() }).encode() {
        Ok(body) => ([(header::CONTENT_TYPE, OCTET_STREAM)], body).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// Serve `router` on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| Error::network("listener", e.to_string()))?;
    info!(%addr, "peercache server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::network(addr.to_string(), e.to_string()))
}
