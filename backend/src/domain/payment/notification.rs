//! Midtrans HTTP notification payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::foundation::{OrderId, Timestamp};

use super::errors::NotificationError;
use super::transaction_status::{FraudStatus, TransactionStatus};

/// A payment notification as posted by Midtrans.
///
/// Every field is optional on the wire; callers decide what is required.
/// Only `order_id` is strictly typed. The informational fields read as
/// `None` when they carry an unexpected JSON type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentNotification {
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub transaction_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub fraud_status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub payment_type: Option<String>,
    /// Midtrans sends this as a decimal string, sandbox tools sometimes as a number.
    pub gross_amount: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub transaction_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub transaction_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub settlement_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub customer_details: Option<CustomerContact>,
}

/// The part of `customer_details` the notification handler uses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerContact {
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl PaymentNotification {
    /// Parses a verified request body.
    ///
    /// Valid JSON that is not an object carries no `order_id`, so it is
    /// reported as `MissingOrderId` rather than a parse failure.
    ///
    /// # Errors
    ///
    /// - `InvalidJson` - not JSON, or `order_id` is not a string
    /// - `MissingOrderId` - JSON but not an object
    pub fn from_slice(body: &[u8]) -> Result<Self, NotificationError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| NotificationError::InvalidJson(e.to_string()))?;
        if !value.is_object() {
            return Err(NotificationError::MissingOrderId);
        }
        serde_json::from_value(value).map_err(|e| NotificationError::InvalidJson(e.to_string()))
    }

    /// Required order identifier. Empty strings count as absent.
    pub fn order_id(&self) -> Result<OrderId, NotificationError> {
        self.order_id
            .as_deref()
            .ok_or(NotificationError::MissingOrderId)
            .and_then(|id| OrderId::new(id).map_err(|_| NotificationError::MissingOrderId))
    }

    pub fn status(&self) -> Option<TransactionStatus> {
        self.transaction_status.as_deref().map(TransactionStatus::from)
    }

    pub fn fraud(&self) -> Option<FraudStatus> {
        self.fraud_status.as_deref().map(FraudStatus::from)
    }

    /// Customer email for the confirmation message, if present and non-blank.
    pub fn customer_email(&self) -> Option<&str> {
        self.customer_details
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Gross amount rendered for logs, whichever JSON type it arrived as.
    pub fn gross_amount_display(&self) -> String {
        match &self.gross_amount {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        }
    }

    /// When the reported state became true at the processor.
    ///
    /// Prefers `settlement_time`, then `transaction_time`; unparseable or
    /// absent values fall back to `received_at`.
    pub fn observed_at(&self, received_at: Timestamp) -> Timestamp {
        [&self.settlement_time, &self.transaction_time]
            .into_iter()
            .flatten()
            .find_map(|raw| Timestamp::parse_midtrans(raw).ok())
            .unwrap_or(received_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<PaymentNotification, NotificationError> {
        PaymentNotification::from_slice(json.as_bytes())
    }

    #[test]
    fn parses_full_settlement_notification() {
        let n = parse(
            r#"{
                "transaction_time": "2024-03-01 14:00:00",
                "transaction_status": "settlement",
                "transaction_id": "9aed5972-5b6a-401e-894b-a32c91ed1a3a",
                "status_code": "200",
                "signature_key": "ignored",
                "settlement_time": "2024-03-01 14:02:10",
                "payment_type": "bank_transfer",
                "order_id": "NEXUS-PRO-1709276400",
                "gross_amount": "150000.00",
                "fraud_status": "accept",
                "currency": "IDR",
                "customer_details": { "email": "ops@plant.example", "first_name": "Ayu" }
            }"#,
        )
        .unwrap();

        assert_eq!(n.order_id().unwrap().as_str(), "NEXUS-PRO-1709276400");
        assert_eq!(n.status(), Some(TransactionStatus::Settlement));
        assert_eq!(n.fraud(), Some(FraudStatus::Accept));
        assert_eq!(n.customer_email(), Some("ops@plant.example"));
        assert_eq!(n.gross_amount_display(), "150000.00");
    }

    #[test]
    fn numeric_gross_amount_is_accepted() {
        let n = parse(r#"{"order_id":"A-B-1","gross_amount":150000}"#).unwrap();
        assert_eq!(n.gross_amount_display(), "150000");
    }

    #[test]
    fn malformed_json_is_invalid() {
        assert!(matches!(parse("{not json"), Err(NotificationError::InvalidJson(_))));
        assert!(matches!(parse(""), Err(NotificationError::InvalidJson(_))));
    }

    #[test]
    fn wrongly_typed_order_id_is_invalid() {
        assert!(matches!(
            parse(r#"{"order_id": 42}"#),
            Err(NotificationError::InvalidJson(_))
        ));
    }

    #[test]
    fn wrongly_typed_informational_fields_are_ignored() {
        let n = parse(
            r#"{"order_id":"A-B-1",
                "transaction_status":"settlement",
                "payment_type":1,
                "transaction_id":7,
                "fraud_status":["accept"],
                "settlement_time":false,
                "customer_details":"ops@plant.example"}"#,
        )
        .unwrap();

        assert_eq!(n.status(), Some(TransactionStatus::Settlement));
        assert_eq!(n.payment_type, None);
        assert_eq!(n.transaction_id, None);
        assert_eq!(n.fraud(), None);
        assert_eq!(n.settlement_time, None);
        assert_eq!(n.customer_email(), None);
    }

    #[test]
    fn wrongly_typed_status_reads_as_absent() {
        let n = parse(r#"{"order_id":"A-B-1","transaction_status":200}"#).unwrap();

        assert_eq!(n.status(), None);
        assert!(n.order_id().is_ok());
    }

    #[test]
    fn non_object_json_has_no_order_id() {
        assert!(matches!(parse("[]"), Err(NotificationError::MissingOrderId)));
        assert!(matches!(parse("null"), Err(NotificationError::MissingOrderId)));
    }

    #[test]
    fn missing_or_empty_order_id_is_rejected() {
        let n = parse(r#"{"transaction_status":"settlement"}"#).unwrap();
        assert!(matches!(n.order_id(), Err(NotificationError::MissingOrderId)));

        let n = parse(r#"{"order_id":""}"#).unwrap();
        assert!(matches!(n.order_id(), Err(NotificationError::MissingOrderId)));
    }

    #[test]
    fn blank_customer_email_is_absent() {
        let n = parse(r#"{"order_id":"A-B-1","customer_details":{"email":"  "}}"#).unwrap();
        assert_eq!(n.customer_email(), None);

        let n = parse(r#"{"order_id":"A-B-1","customer_details":null}"#).unwrap();
        assert_eq!(n.customer_email(), None);
    }

    #[test]
    fn observed_at_prefers_settlement_time() {
        let n = parse(
            r#"{"order_id":"A-B-1",
                "transaction_time":"2024-03-01 14:00:00",
                "settlement_time":"2024-03-01 14:02:10"}"#,
        )
        .unwrap();

        assert_eq!(
            n.observed_at(Timestamp::now()),
            Timestamp::parse_midtrans("2024-03-01 14:02:10").unwrap()
        );
    }

    #[test]
    fn observed_at_skips_unparseable_settlement_time() {
        let n = parse(
            r#"{"order_id":"A-B-1",
                "transaction_time":"2024-03-01 14:00:00",
                "settlement_time":"soon"}"#,
        )
        .unwrap();

        assert_eq!(
            n.observed_at(Timestamp::now()),
            Timestamp::parse_midtrans("2024-03-01 14:00:00").unwrap()
        );
    }

    #[test]
    fn observed_at_falls_back_to_receipt_time() {
        let n = parse(r#"{"order_id":"A-B-1"}"#).unwrap();
        let received = Timestamp::now();

        assert_eq!(n.observed_at(received), received);
    }
}
