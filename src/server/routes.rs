//! HTTP handlers for the resolution boundary

use crate::normalize::VideoResult;
use crate::server::ServerState;
use crate::utils::error::ResolveError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// The single `url` parameter, accepted from a query string or JSON body
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response envelope for the resolve endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveEnvelope {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VideoResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolveEnvelope {
    fn success(result: VideoResult) -> Self {
        Self {
            status: "success".to_string(),
            result: Some(result),
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            result: None,
            error: Some(message.into()),
        }
    }
}

/// Input and no-data failures are the caller's problem; transport and
/// unclassified failures are ours.
fn status_for(error: &ResolveError) -> StatusCode {
    match error {
        ResolveError::InvalidInput(_) | ResolveError::NoData(_) => StatusCode::BAD_REQUEST,
        ResolveError::UpstreamUnavailable(_) | ResolveError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn resolve_get(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ResolveParams>,
) -> Response {
    resolve_with(state, params.url).await
}

pub async fn resolve_post(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<ResolveParams>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(params)) => resolve_with(state, params.url).await,
        Err(rejection) => {
            warn!("Rejected resolve body: {}", rejection.body_text());
            failure_response(StatusCode::BAD_REQUEST, "invalid JSON body")
        }
    }
}

async fn resolve_with(state: Arc<ServerState>, url: Option<String>) -> Response {
    let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
        return failure_response(StatusCode::BAD_REQUEST, "url is required");
    };

    match state.service.resolve(&url).await {
        Ok(result) => (StatusCode::OK, Json(ResolveEnvelope::success(result))).into_response(),
        Err(e) => {
            warn!("Resolution failed for {}: {}", url, e);
            failure_response(status_for(&e), &e.to_string())
        }
    }
}

fn failure_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ResolveEnvelope::failure(message))).into_response()
}

/// Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> Response {
    failure_response(StatusCode::NOT_FOUND, "not found")
}
