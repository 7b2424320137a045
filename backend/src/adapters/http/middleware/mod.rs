//! HTTP middleware for axum.
//!
//! - `cors` - CORS layer and the 204 preflight rewrite

pub mod cors;

use std::time::Duration;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use cors::{create_cors_layer, preflight_no_content};

/// Wrap the application router in the service middleware stack.
///
/// Outermost first: request id, tracing, timeout, preflight rewrite, CORS,
/// compression.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(CompressionLayer::new())
        .layer(create_cors_layer(&config.cors_origins_list()))
        .layer(axum::middleware::from_fn(preflight_no_content))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::routing::post;
    use tower::ServiceExt;

    fn app(cors_origins: Option<&str>) -> Router {
        let config = ServerConfig {
            cors_origins: cors_origins.map(str::to_string),
            ..Default::default()
        };
        let router = Router::new().route(
            "/api/payment/create",
            post(|| async { "ok" }).options(|| async { StatusCode::NO_CONTENT }),
        );
        with_middleware(router, &config)
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/payment/create")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Preflight Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn browser_preflight_is_204_with_cors_headers() {
        let response = app(None)
            .oneshot(preflight("https://app.nexusedge.id"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn preflight_echoes_configured_origin() {
        let response = app(Some("https://app.nexusedge.id, http://localhost:5173"))
            .oneshot(preflight("http://localhost:5173"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn post_passes_through_with_request_id() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/payment/create")
            .body(Body::empty())
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
