//! CreateCheckoutHandler - opens a Midtrans Snap transaction for a plan purchase.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::OrderId;
use crate::ports::{
    CustomerDetails, ItemDetail, PaymentError, PaymentGateway, TransactionRequest,
};

const ITEM_BRAND: &str = "NexusEdge";
const ITEM_CATEGORY: &str = "IIoT Subscription";

/// Command to create a checkout. Every field is required.
#[derive(Debug, Clone, Default)]
pub struct CreateCheckoutCommand {
    pub order_id: Option<String>,
    pub gross_amount: Option<u64>,
    pub customer_details: Option<CustomerDetails>,
    pub plan_id: Option<String>,
}

/// Result of a successful checkout creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCheckoutResult {
    pub token: String,
    pub redirect_url: Option<String>,
}

/// Errors from checkout creation. Display text is the client-facing message.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Failed to create payment")]
    Gateway(#[from] PaymentError),
}

/// Handler for creating hosted checkouts.
pub struct CreateCheckoutHandler {
    gateway: Arc<dyn PaymentGateway>,
    public_base_url: String,
}

impl CreateCheckoutHandler {
    /// `public_base_url` is where Midtrans can reach this service.
    pub fn new(gateway: Arc<dyn PaymentGateway>, public_base_url: impl Into<String>) -> Self {
        Self {
            gateway,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, CheckoutError> {
        let request = self.build_request(cmd)?;
        let order_id = request.order_id.clone();

        let token = self
            .gateway
            .create_transaction(&request)
            .await
            .map_err(|e| {
                tracing::error!(
                    order_id = %order_id,
                    code = %e.code,
                    provider_code = e.provider_code.as_deref().unwrap_or("-"),
                    error = %e.message,
                    "checkout creation failed"
                );
                e
            })?;

        tracing::info!(
            order_id = %order_id,
            gross_amount = request.gross_amount,
            "checkout created"
        );

        Ok(CreateCheckoutResult {
            token: token.token,
            redirect_url: token.redirect_url,
        })
    }

    fn build_request(&self, cmd: CreateCheckoutCommand) -> Result<TransactionRequest, CheckoutError> {
        let (Some(order_id), Some(gross_amount), Some(customer), Some(plan_id)) =
            (cmd.order_id, cmd.gross_amount, cmd.customer_details, cmd.plan_id)
        else {
            return Err(CheckoutError::MissingFields);
        };
        if gross_amount == 0 {
            return Err(CheckoutError::MissingFields);
        }
        let order_id = OrderId::new(order_id).map_err(|_| CheckoutError::MissingFields)?;
        if plan_id.trim().is_empty() {
            return Err(CheckoutError::MissingFields);
        }

        // The client's plan id is echoed as-is; only the name is capitalized.
        let item = ItemDetail {
            name: format!("NexusEdge {} Plan", capitalize_first(&plan_id)),
            id: plan_id,
            price: gross_amount,
            quantity: 1,
            brand: ITEM_BRAND.to_string(),
            category: ITEM_CATEGORY.to_string(),
        };

        Ok(TransactionRequest {
            order_id,
            gross_amount,
            customer,
            items: vec![item],
            notification_url: format!("{}/api/payment/webhook", self.public_base_url),
            finish_url: format!("{}/feature", self.public_base_url),
        })
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
