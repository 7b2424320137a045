//! HTTP DTOs for payment endpoints.
//!
//! Field names follow what the storefront already sends: camelCase on the
//! checkout request, snake_case everywhere Midtrans defines the shape.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::CreateCheckoutCommand;
use crate::ports::CustomerDetails;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a Snap checkout.
///
/// Every field is optional at the wire level so that absence is reported as
/// "Missing required fields" rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub gross_amount: Option<u64>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub plan_id: Option<String>,
}

impl From<CreateCheckoutRequest> for CreateCheckoutCommand {
    fn from(req: CreateCheckoutRequest) -> Self {
        Self {
            order_id: req.order_id,
            gross_amount: req.gross_amount,
            customer_details: req.customer_details,
            plan_id: req.plan_id,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Acknowledgement returned to Midtrans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Snap token for the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutResponse {
    pub token: String,
}

/// Error body shared by both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_request_reads_camel_case() {
        let req: CreateCheckoutRequest = serde_json::from_str(
            r#"{
                "orderId": "NEXUS-PRO-1709276400",
                "grossAmount": 150000,
                "customerDetails": {"firstName": "Ayu", "email": "ayu@plant.example"},
                "planId": "pro"
            }"#,
        )
        .unwrap();

        assert_eq!(req.order_id.as_deref(), Some("NEXUS-PRO-1709276400"));
        assert_eq!(req.gross_amount, Some(150_000));
        assert_eq!(
            req.customer_details.unwrap().first_name.as_deref(),
            Some("Ayu")
        );
        assert_eq!(req.plan_id.as_deref(), Some("pro"));
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let req: CreateCheckoutRequest = serde_json::from_str("{}").unwrap();

        assert!(req.order_id.is_none());
        assert!(req.gross_amount.is_none());
    }

    #[test]
    fn ack_serializes_received_true() {
        assert_eq!(
            serde_json::to_string(&WebhookAck::received()).unwrap(),
            r#"{"received":true}"#
        );
    }
}
