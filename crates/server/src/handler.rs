//! HTTP routes.
//!
//! The set-status route accepts the token from a JSON body or from the
//! `status` query parameter. A body that parses and carries a `status`
//! string wins; anything else falls back to the query.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;

use messenger_notifier_protocol::{
    ErrorResponse, SET_ICON_PATH, STATUS_PATH, SetStatusRequest, SetStatusResponse, Status,
    StatusResponse,
};

use crate::server::StatusServer;

pub(crate) fn router(server: Arc<StatusServer>) -> Router {
    Router::new()
        .route(SET_ICON_PATH, get(set_icon).post(set_icon))
        .route(STATUS_PATH, get(get_status))
        .with_state(server)
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

/// GET|POST /set-messenger-icon
async fn set_icon(
    State(server): State<Arc<StatusServer>>,
    query: Result<Query<StatusQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let query_token = match query {
        Ok(Query(q)) => q.status,
        Err(e) => {
            tracing::debug!("ignoring malformed query: {e}");
            None
        }
    };

    let token = requested_token(&body, query_token);
    match token.as_deref().map(str::parse::<Status>) {
        Some(Ok(status)) => {
            server.apply(status).await;
            (StatusCode::OK, Json(SetStatusResponse::accepted(status))).into_response()
        }
        Some(Err(e)) => {
            tracing::warn!("rejected set-status request: {e}");
            invalid_status()
        }
        None => {
            tracing::warn!("rejected set-status request: no status given");
            invalid_status()
        }
    }
}

/// GET /status
async fn get_status(State(server): State<Arc<StatusServer>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        success: true,
        current_status: server.store().get().await,
        port: server.port().await,
    })
}

fn invalid_status() -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::invalid_status())).into_response()
}

/// Picks the status token: parseable body first, then the query.
fn requested_token(body: &[u8], query: Option<String>) -> Option<String> {
    if !body.is_empty() {
        match serde_json::from_slice::<SetStatusRequest>(body) {
            Ok(SetStatusRequest {
                status: Some(status),
            }) => return Some(status),
            Ok(_) => {}
            Err(e) => tracing::debug!("ignoring unparseable request body: {e}"),
        }
    }
    query
}
