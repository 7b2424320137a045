//! CORS for the browser-facing checkout endpoint.

use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};

/// Create the CORS layer from the configured origin list.
///
/// An empty list allows any origin.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins)
    };

    cors.allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Rewrites answered `OPTIONS` requests to 204.
///
/// `CorsLayer` answers browser preflights itself with 200 and an empty body;
/// the payment routes promise 204 for every `OPTIONS`.
pub async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_options = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;
    if is_options && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}
