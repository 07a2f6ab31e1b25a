//! HTTP boundary tests driven through the router without a socket.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tiklink::canonical::RedirectProbe;
use tiklink::extractor::{EngineVersion, ExtractionEngine, RawEngineResult};
use tiklink::normalize::VariantKind;
use tiklink::resolver::ResolveService;
use tiklink::server::routes::ResolveEnvelope;
use tiklink::server::{build_router, ServerState};
use tiklink::utils::config::AppSettings;
use tiklink::utils::error::EngineError;
use tower::ServiceExt;

struct OfflineProbe;

#[async_trait]
impl RedirectProbe for OfflineProbe {
    async fn resolve_location(&self, _url: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("network unreachable"))
    }
}

struct ScriptedEngine {
    reply: serde_json::Value,
}

#[async_trait]
impl ExtractionEngine for ScriptedEngine {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn fetch(
        &self,
        _url: &str,
        _version: EngineVersion,
    ) -> Result<RawEngineResult, EngineError> {
        Ok(serde_json::from_value(self.reply.clone()).expect("scripted reply"))
    }
}

fn router_with(reply: serde_json::Value) -> Router {
    let settings = AppSettings::default();
    let service = ResolveService::new(
        &settings,
        Arc::new(OfflineProbe),
        Arc::new(ScriptedEngine { reply }),
    );
    build_router(
        Arc::new(ServerState { service }),
        Duration::from_secs(5),
    )
}

async fn envelope_of(response: axum::response::Response) -> ResolveEnvelope {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("envelope json")
}

#[tokio::test]
async fn get_resolve_returns_success_envelope() {
    let app = router_with(serde_json::json!({
        "status": "success",
        "result": {
            "author": { "nickname": "creator" },
            "videoSD": "https://cdn.example/sd.mp4",
        },
    }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/resolve?url=https://www.tiktok.com/@user/video/123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = envelope_of(response).await;
    assert_eq!(envelope.status, "success");
    let result = envelope.result.expect("result");
    assert_eq!(result.author.nickname, "creator");
    assert_eq!(result.variants[0].kind, VariantKind::Sd);
}

#[tokio::test]
async fn post_resolve_accepts_json_body() {
    let app = router_with(serde_json::json!({
        "status": "success",
        "result": { "videoHD": "https://cdn.example/hd.mp4" },
    }));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/resolve")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"url":"https://www.tiktok.com/@user/video/123"}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = envelope_of(response).await;
    assert_eq!(envelope.status, "success");
}

#[tokio::test]
async fn missing_url_parameter_is_bad_request() {
    let app = router_with(serde_json::json!({ "status": "success" }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/resolve")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = envelope_of(response).await;
    assert_eq!(envelope.status, "error");
    assert_eq!(envelope.error.as_deref(), Some("url is required"));
}

#[tokio::test]
async fn unsupported_link_is_bad_request() {
    let app = router_with(serde_json::json!({ "status": "success" }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/resolve?url=https://vimeo.com/9")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = envelope_of(response).await;
    assert_eq!(envelope.status, "error");
}

#[tokio::test]
async fn no_data_reply_is_bad_request() {
    let app = router_with(serde_json::json!({ "status": "success" }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/resolve?url=https://www.tiktok.com/@user/video/123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = envelope_of(response).await;
    assert_eq!(envelope.status, "error");
}

#[tokio::test]
async fn engine_failure_is_server_error() {
    let app = router_with(serde_json::json!({
        "status": "error",
        "message": "extraction blocked",
    }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/resolve?url=https://www.tiktok.com/@user/video/123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = envelope_of(response).await;
    assert_eq!(envelope.status, "error");
    assert!(envelope.error.expect("message").contains("extraction blocked"));
}

#[tokio::test]
async fn malformed_post_body_is_bad_request() {
    let app = router_with(serde_json::json!({ "status": "success" }));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/resolve")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = envelope_of(response).await;
    assert_eq!(envelope.error.as_deref(), Some("invalid JSON body"));
}

#[tokio::test]
async fn health_probe_answers() {
    let app = router_with(serde_json::json!({ "status": "success" }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = router_with(serde_json::json!({ "status": "success" }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
