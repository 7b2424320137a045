//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    create_checkout, handle_payment_webhook, method_not_allowed, preflight, PaymentAppState,
};

/// Create the payment API router.
///
/// # Routes
///
/// - `POST /webhook` - Midtrans payment notification (signature verified)
/// - `POST /create` - Open a Snap checkout
///
/// Both answer `OPTIONS` with 204 and any other method with 405.
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route(
            "/webhook",
            post(handle_payment_webhook)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/create",
            post(create_checkout)
                .options(preflight)
                .fallback(method_not_allowed),
        )
}

/// Create the complete payment module router, mounted at `/api/payment`.
///
/// # Example
///
/// ```ignore
/// let app = payment_router().with_state(state);
/// ```
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new().nest("/api/payment", payment_routes())
}
