//! HTTP boundary
//!
//! Exposes the resolution service over a small axum router with the
//! transport middleware applied at the edge: tracing, timeout, CORS, and a
//! request id echoed back to the caller.

pub mod routes;

use crate::resolver::ResolveService;
use crate::utils::config::AppSettings;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state
pub struct ServerState {
    pub service: ResolveService,
}

/// Build the router with all routes and middleware
pub fn build_router(state: Arc<ServerState>, timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/api/resolve",
            get(routes::resolve_get).post(routes::resolve_post),
        )
        .fallback(routes::not_found)
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and block until shutdown
pub async fn serve(settings: AppSettings) -> anyhow::Result<()> {
    let service = ResolveService::from_settings(&settings)?;
    let state = Arc::new(ServerState { service });
    let app = build_router(state, Duration::from_secs(settings.http_timeout_secs));

    let addr: SocketAddr = format!("{}:{}", settings.bind_addr, settings.port).parse()?;
    info!("Starting tiklink server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Request ID injection middleware
async fn request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
