//! Midtrans Snap API wire types.

use serde::{Deserialize, Serialize};

use crate::ports::{CustomerDetails, ItemDetail, TransactionRequest};

/// Body of `POST /snap/v1/transactions`.
#[derive(Debug, Clone, Serialize)]
pub struct SnapTransactionBody<'a> {
    pub transaction_details: TransactionDetails<'a>,
    pub customer_details: &'a CustomerDetails,
    pub item_details: &'a [ItemDetail],
    pub callbacks: Callbacks<'a>,
    pub finish_redirect_url: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetails<'a> {
    pub order_id: &'a str,
    pub gross_amount: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Callbacks<'a> {
    pub notification_url: &'a str,
}

impl<'a> From<&'a TransactionRequest> for SnapTransactionBody<'a> {
    fn from(request: &'a TransactionRequest) -> Self {
        Self {
            transaction_details: TransactionDetails {
                order_id: request.order_id.as_str(),
                gross_amount: request.gross_amount,
            },
            customer_details: &request.customer,
            item_details: &request.items,
            callbacks: Callbacks {
                notification_url: &request.notification_url,
            },
            finish_redirect_url: &request.finish_url,
        }
    }
}

/// Successful Snap response.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapTokenResponse {
    pub token: String,
    pub redirect_url: Option<String>,
}

/// Snap error response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapErrorResponse {
    #[serde(default)]
    pub error_messages: Vec<String>,
}

impl SnapErrorResponse {
    /// Parses an error body, falling back to the raw text.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|e| !e.error_messages.is_empty())
            .unwrap_or_else(|| Self {
                error_messages: vec![body.trim().to_string()],
            })
    }

    pub fn message(&self) -> String {
        self.error_messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OrderId;

    fn request() -> TransactionRequest {
        TransactionRequest {
            order_id: OrderId::new("NEXUS-PRO-1709276400").unwrap(),
            gross_amount: 150_000,
            customer: CustomerDetails {
                first_name: Some("Ayu".to_string()),
                email: Some("ayu@plant.example".to_string()),
                ..Default::default()
            },
            items: vec![ItemDetail {
                id: "pro".to_string(),
                price: 150_000,
                quantity: 1,
                name: "NexusEdge Pro Plan".to_string(),
                brand: "NexusEdge".to_string(),
                category: "IIoT Subscription".to_string(),
            }],
            notification_url: "https://app.nexusedge.id/api/payment/webhook".to_string(),
            finish_url: "https://app.nexusedge.id/feature".to_string(),
        }
    }

    #[test]
    fn body_matches_snap_schema() {
        let request = request();
        let json = serde_json::to_value(SnapTransactionBody::from(&request)).unwrap();

        assert_eq!(json["transaction_details"]["order_id"], "NEXUS-PRO-1709276400");
        assert_eq!(json["transaction_details"]["gross_amount"], 150_000);
        assert_eq!(json["customer_details"]["first_name"], "Ayu");
        assert_eq!(json["item_details"][0]["name"], "NexusEdge Pro Plan");
        assert_eq!(json["item_details"][0]["quantity"], 1);
        assert_eq!(
            json["callbacks"]["notification_url"],
            "https://app.nexusedge.id/api/payment/webhook"
        );
        assert_eq!(json["finish_redirect_url"], "https://app.nexusedge.id/feature");
    }

    #[test]
    fn token_response_parses() {
        let response: SnapTokenResponse = serde_json::from_str(
            r#"{"token":"66e4fa55","redirect_url":"https://app.sandbox.midtrans.com/snap/v4/redirection/66e4fa55"}"#,
        )
        .unwrap();

        assert_eq!(response.token, "66e4fa55");
        assert!(response.redirect_url.is_some());
    }

    #[test]
    fn error_response_joins_messages() {
        let err = SnapErrorResponse::parse(
            r#"{"error_messages":["transaction_details.order_id sudah digunakan","gross_amount is invalid"]}"#,
        );

        assert_eq!(
            err.message(),
            "transaction_details.order_id sudah digunakan; gross_amount is invalid"
        );
    }

    #[test]
    fn non_json_error_keeps_raw_text() {
        let err = SnapErrorResponse::parse("<html>Bad Gateway</html>\n");

        assert_eq!(err.message(), "<html>Bad Gateway</html>");
    }
}
